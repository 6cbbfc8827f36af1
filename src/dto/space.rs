use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::constraint::Constraints;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpaceDto {
    pub id: Uuid,
    pub owner_user_id: Option<Uuid>,
    pub owner_organization_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub constraints: Constraints,
    pub marked_for_removal: bool,
}

/// Registration body. Exactly one of `owner_user_id`/`owner_organization_id`
/// must be set, and at most one of `plan_id`/`constraints`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterSpaceDto {
    pub owner_user_id: Option<Uuid>,
    pub owner_organization_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub constraints: Option<Constraints>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignPlanDto {
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetConstraintsDto {
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferOwnerDto {
    pub owner_user_id: Option<Uuid>,
    pub owner_organization_id: Option<Uuid>,
}
