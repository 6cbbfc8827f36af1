use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::constraint::Constraints;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
    pub id: Uuid,
    pub label: String,
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlanDto {
    pub label: String,
    #[serde(default)]
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePlanDto {
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangeConstraintsDto {
    pub constraints: Constraints,
}

/// Result of pushing a plan's constraints to its linked spaces.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanSyncResultDto {
    pub plan_id: Uuid,
    /// Number of spaces whose constraint set actually changed.
    pub updated_spaces: u64,
}
