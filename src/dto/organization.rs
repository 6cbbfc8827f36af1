use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: Uuid,
    pub name: String,
    pub internal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationMemberDto {
    pub user_id: Uuid,
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrganizationDto {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrganizationDto {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddMemberDto {
    /// `manager` or `collaborator`.
    pub level: String,
}
