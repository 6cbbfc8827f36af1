use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MailboxDto {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub address: String,
    pub size_quota: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MailForwardDto {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub address: String,
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterMailboxDto {
    pub domain_name_id: Uuid,
    /// Local part of the address.
    pub address: String,
    /// Size quota in bytes.
    pub size_quota: i64,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterMailForwardDto {
    pub domain_name_id: Uuid,
    pub address: String,
    pub destination: String,
}
