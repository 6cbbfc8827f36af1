use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Error body for domain invariant and plan-constraint violations.
///
/// `message_id` is a stable translator id; `arguments` carries the structured
/// values the translated message interpolates.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DomainErrorDto {
    pub error: String,
    pub message_id: String,
    pub arguments: serde_json::Value,
}
