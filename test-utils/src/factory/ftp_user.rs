//! FTP user factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct FtpUserFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    space_id: Option<Uuid>,
    domain_name_id: Option<Uuid>,
    username: String,
}

impl<'a> FtpUserFactory<'a> {
    /// Creates a new FtpUserFactory. `space_id` and `domain_name_id` must be
    /// set before building.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            space_id: None,
            domain_name_id: None,
            username: format!("ftp{}", next_id()),
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

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub async fn build(self) -> Result<entity::ftp_user::Model, DbErr> {
        entity::ftp_user::ActiveModel {
            id: ActiveValue::Set(self.id),
            space_id: ActiveValue::Set(self.space_id.expect("space_id is required")),
            domain_name_id: ActiveValue::Set(
                self.domain_name_id.expect("domain_name_id is required"),
            ),
            username: ActiveValue::Set(self.username),
            password_hash: ActiveValue::Set("$argon2id$test".to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}
