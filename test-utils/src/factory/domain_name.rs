//! Domain-name factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct DomainNameFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    name: String,
    tld: String,
    space_id: Option<Uuid>,
    is_primary: bool,
}

impl<'a> DomainNameFactory<'a> {
    /// Creates a new DomainNameFactory with a unique `example{n}.com`
    /// default, unassigned and non-primary.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            name: format!("example{}", next_id()),
            tld: "com".to_string(),
            space_id: None,
            is_primary: false,
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

    pub fn tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    pub fn space_id(mut self, space_id: Uuid) -> Self {
        self.space_id = Some(space_id);
        self
    }

    pub fn primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub async fn build(self) -> Result<entity::domain_name::Model, DbErr> {
        let now = Utc::now();
        entity::domain_name::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            tld: ActiveValue::Set(self.tld),
            space_id: ActiveValue::Set(self.space_id),
            is_primary: ActiveValue::Set(self.is_primary),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_domain_name(
    db: &DatabaseConnection,
) -> Result<entity::domain_name::Model, DbErr> {
    DomainNameFactory::new(db).build().await
}
