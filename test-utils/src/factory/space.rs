//! Space factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct SpaceFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    owner_user_id: Option<Uuid>,
    owner_organization_id: Option<Uuid>,
    plan_id: Option<Uuid>,
    constraints: serde_json::Value,
    marked_for_removal_at: Option<DateTime<Utc>>,
}

impl<'a> SpaceFactory<'a> {
    /// Creates a new SpaceFactory. An owner must be set through
    /// `owner_user_id` or `owner_organization_id` before building.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            owner_user_id: None,
            owner_organization_id: None,
            plan_id: None,
            constraints: serde_json::json!({}),
            marked_for_removal_at: None,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn owner_user_id(mut self, user_id: Uuid) -> Self {
        self.owner_user_id = Some(user_id);
        self
    }

    pub fn owner_organization_id(mut self, organization_id: Uuid) -> Self {
        self.owner_organization_id = Some(organization_id);
        self
    }

    pub fn plan_id(mut self, plan_id: Uuid) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    /// Constraint set as the JSON column value.
    pub fn constraints(mut self, constraints: serde_json::Value) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn marked_for_removal_at(mut self, at: DateTime<Utc>) -> Self {
        self.marked_for_removal_at = Some(at);
        self
    }

    pub async fn build(self) -> Result<entity::space::Model, DbErr> {
        let now = Utc::now();
        entity::space::ActiveModel {
            id: ActiveValue::Set(self.id),
            owner_user_id: ActiveValue::Set(self.owner_user_id),
            owner_organization_id: ActiveValue::Set(self.owner_organization_id),
            plan_id: ActiveValue::Set(self.plan_id),
            constraints: ActiveValue::Set(self.constraints),
            marked_for_removal_at: ActiveValue::Set(self.marked_for_removal_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user-owned space with no constraints.
pub async fn create_space_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::space::Model, DbErr> {
    SpaceFactory::new(db).owner_user_id(user_id).build().await
}

/// Creates an organization-owned space with no constraints.
pub async fn create_space_for_organization(
    db: &DatabaseConnection,
    organization_id: Uuid,
) -> Result<entity::space::Model, DbErr> {
    SpaceFactory::new(db)
        .owner_organization_id(organization_id)
        .build()
        .await
}
