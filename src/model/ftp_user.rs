//! FTP user scoped to a space and one of its domain names.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::ftp_user::FtpUserDto;

#[derive(Debug, Clone)]
pub struct FtpUser {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl FtpUser {
    pub fn register(
        id: Uuid,
        space_id: Uuid,
        domain_name_id: Uuid,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            space_id,
            domain_name_id,
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn into_dto(self) -> FtpUserDto {
        FtpUserDto {
            id: self.id,
            space_id: self.space_id,
            domain_name_id: self.domain_name_id,
            username: self.username,
        }
    }

    pub fn from_entity(entity: entity::ftp_user::Model) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            domain_name_id: entity.domain_name_id,
            username: entity.username,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for registering an FTP user.
#[derive(Debug, Clone)]
pub struct RegisterFtpUserParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub username: String,
    /// Plain-text password; hashed by the service.
    pub password: String,
}
