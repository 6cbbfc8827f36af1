use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUserDto {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequestPasswordResetDto {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmPasswordResetDto {
    pub password: String,
}
