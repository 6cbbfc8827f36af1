//! Mailboxes and mail forwards scoped to a space and domain name.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::mailbox::{MailForwardDto, MailboxDto};

#[derive(Debug, Clone)]
pub struct Mailbox {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    /// Local part; the full address is `{address}@{domain fqdn}`.
    pub address: String,
    /// Size quota in bytes.
    pub size_quota: i64,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Mailbox {
    pub fn register(
        id: Uuid,
        space_id: Uuid,
        domain_name_id: Uuid,
        address: impl Into<String>,
        size_quota: i64,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            space_id,
            domain_name_id,
            address: address.into(),
            size_quota,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn resize(&mut self, size_quota: i64) {
        self.size_quota = size_quota;
    }

    pub fn into_dto(self) -> MailboxDto {
        MailboxDto {
            id: self.id,
            space_id: self.space_id,
            domain_name_id: self.domain_name_id,
            address: self.address,
            size_quota: self.size_quota,
        }
    }

    pub fn from_entity(entity: entity::mailbox::Model) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            domain_name_id: entity.domain_name_id,
            address: entity.address,
            size_quota: entity.size_quota,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MailForward {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub address: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl MailForward {
    pub fn register(
        id: Uuid,
        space_id: Uuid,
        domain_name_id: Uuid,
        address: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id,
            space_id,
            domain_name_id,
            address: address.into(),
            destination: destination.into(),
            created_at: Utc::now(),
        }
    }

    pub fn into_dto(self) -> MailForwardDto {
        MailForwardDto {
            id: self.id,
            space_id: self.space_id,
            domain_name_id: self.domain_name_id,
            address: self.address,
            destination: self.destination,
        }
    }

    pub fn from_entity(entity: entity::mail_forward::Model) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            domain_name_id: entity.domain_name_id,
            address: entity.address,
            destination: entity.destination,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for registering a mailbox.
#[derive(Debug, Clone)]
pub struct RegisterMailboxParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub address: String,
    pub size_quota: i64,
    /// Plain-text password; hashed by the service.
    pub password: String,
}

/// Parameters for registering a mail forward.
#[derive(Debug, Clone)]
pub struct RegisterMailForwardParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub address: String,
    pub destination: String,
}
