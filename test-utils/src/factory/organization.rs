//! Organization factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct OrganizationFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    name: String,
    internal: bool,
}

impl<'a> OrganizationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            name: format!("Organization {}", next_id()),
            internal: false,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    pub async fn build(self) -> Result<entity::organization::Model, DbErr> {
        let now = Utc::now();
        entity::organization::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            internal: ActiveValue::Set(self.internal),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_organization(
    db: &DatabaseConnection,
) -> Result<entity::organization::Model, DbErr> {
    OrganizationFactory::new(db).build().await
}

/// Adds a membership row directly, bypassing the service layer.
pub async fn add_member(
    db: &DatabaseConnection,
    organization_id: Uuid,
    user_id: Uuid,
    level: &str,
) -> Result<entity::organization_member::Model, DbErr> {
    entity::organization_member::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        user_id: ActiveValue::Set(user_id),
        level: ActiveValue::Set(level.to_string()),
        added_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
