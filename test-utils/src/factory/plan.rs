//! Plan factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct PlanFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    label: String,
    constraints: serde_json::Value,
}

impl<'a> PlanFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            label: format!("Plan {}", next_id()),
            constraints: serde_json::json!({}),
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Constraint set as the JSON column value, e.g.
    /// `json!({ "mailbox_count": 10 })`.
    pub fn constraints(mut self, constraints: serde_json::Value) -> Self {
        self.constraints = constraints;
        self
    }

    pub async fn build(self) -> Result<entity::plan::Model, DbErr> {
        let now = Utc::now();
        entity::plan::ActiveModel {
            id: ActiveValue::Set(self.id),
            label: ActiveValue::Set(self.label),
            constraints: ActiveValue::Set(self.constraints),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_plan(db: &DatabaseConnection) -> Result<entity::plan::Model, DbErr> {
    PlanFactory::new(db).build().await
}
