use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FtpUserDto {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterFtpUserDto {
    pub domain_name_id: Uuid,
    pub username: String,
    pub password: String,
}
