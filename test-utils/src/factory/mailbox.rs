//! Mailbox factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct MailboxFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    space_id: Option<Uuid>,
    domain_name_id: Option<Uuid>,
    address: String,
    size_quota: i64,
}

impl<'a> MailboxFactory<'a> {
    /// Creates a new MailboxFactory. `space_id` and `domain_name_id` must be
    /// set before building.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            space_id: None,
            domain_name_id: None,
            address: format!("box{}", next_id()),
            size_quota: 1024 * 1024,
        }
    }

    pub fn space_id(mut self, space_id: Uuid) -> Self {
        self.space_id = Some(space_id);
        self
    }

    pub fn domain_name_id(mut self, domain_name_id: Uuid) -> Self {
        self.domain_name_id = Some(domain_name_id);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn size_quota(mut self, size_quota: i64) -> Self {
        self.size_quota = size_quota;
        self
    }

    pub async fn build(self) -> Result<entity::mailbox::Model, DbErr> {
        entity::mailbox::ActiveModel {
            id: ActiveValue::Set(self.id),
            space_id: ActiveValue::Set(self.space_id.expect("space_id is required")),
            domain_name_id: ActiveValue::Set(
                self.domain_name_id.expect("domain_name_id is required"),
            ),
            address: ActiveValue::Set(self.address),
            size_quota: ActiveValue::Set(self.size_quota),
            password_hash: ActiveValue::Set("$argon2id$test".to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}
