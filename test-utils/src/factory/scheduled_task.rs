//! Scheduled-task factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct ScheduledTaskFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    space_id: Option<Uuid>,
    schedule: String,
    command: String,
    enabled: bool,
    last_run_at: Option<DateTime<Utc>>,
}

impl<'a> ScheduledTaskFactory<'a> {
    /// Creates a new ScheduledTaskFactory with an every-minute schedule.
    /// `space_id` must be set before building.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            space_id: None,
            schedule: "* * * * *".to_string(),
            command: "/usr/bin/true".to_string(),
            enabled: true,
            last_run_at: None,
        }
    }

    pub fn space_id(mut self, space_id: Uuid) -> Self {
        self.space_id = Some(space_id);
        self
    }

    pub fn schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn last_run_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_run_at = Some(at);
        self
    }

    pub async fn build(self) -> Result<entity::scheduled_task::Model, DbErr> {
        let now = Utc::now();
        entity::scheduled_task::ActiveModel {
            id: ActiveValue::Set(self.id),
            space_id: ActiveValue::Set(self.space_id.expect("space_id is required")),
            schedule: ActiveValue::Set(self.schedule),
            command: ActiveValue::Set(self.command),
            enabled: ActiveValue::Set(self.enabled),
            last_run_at: ActiveValue::Set(self.last_run_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}
