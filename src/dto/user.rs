use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterUserDto {
    pub display_name: String,
    pub email: String,
    pub password: String,
    /// Register as administrator. Only honored for admin callers.
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequestEmailChangeDto {
    pub email: String,
}
