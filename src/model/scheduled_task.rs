//! Scheduled tasks attached to a space.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::scheduled_task::ScheduledTaskDto;

#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub id: Uuid,
    pub space_id: Uuid,
    /// Five-field cron expression in UTC, validated before construction.
    pub schedule: String,
    pub command: String,
    pub enabled: bool,
    pub last_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduledTask {
    pub fn register(
        id: Uuid,
        space_id: Uuid,
        schedule: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            space_id,
            schedule: schedule.into(),
            command: command.into(),
            enabled: true,
            last_run_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.updated_at = Utc::now();
    }

    pub fn update(&mut self, schedule: impl Into<String>, command: impl Into<String>) {
        self.schedule = schedule.into();
        self.command = command.into();
        self.updated_at = Utc::now();
    }

    pub fn into_dto(self) -> ScheduledTaskDto {
        ScheduledTaskDto {
            id: self.id,
            space_id: self.space_id,
            schedule: self.schedule,
            command: self.command,
            enabled: self.enabled,
            last_run_at: self.last_run_at,
        }
    }

    pub fn from_entity(entity: entity::scheduled_task::Model) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            schedule: entity.schedule,
            command: entity.command,
            enabled: entity.enabled,
            last_run_at: entity.last_run_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for registering a scheduled task.
#[derive(Debug, Clone)]
pub struct RegisterScheduledTaskParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub schedule: String,
    pub command: String,
}

/// Parameters for updating a scheduled task.
#[derive(Debug, Clone)]
pub struct UpdateScheduledTaskParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub schedule: String,
    pub command: String,
}
