//! Capability-guard errors.
//!
//! `ConstraintExceeded` is the user-facing outcome of a plan limit being hit;
//! the remaining variants are configuration errors raised when the guard
//! registry and the constraint set disagree, which indicates a programming
//! mistake rather than anything the client can correct.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::api::{DomainErrorDto, ErrorDto},
    model::constraint::ConstraintKind,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// A hard plan limit was hit. Carries the translator id and arguments
    /// for the user-facing message.
    #[error("constraint {kind} exceeded for space {space_id}")]
    ConstraintExceeded {
        kind: ConstraintKind,
        space_id: Uuid,
        message_id: &'static str,
        arguments: serde_json::Value,
    },

    /// The constraint is present in the space's set but no guard
    /// implementation was registered for it.
    #[error("no capability guard registered for constraint {kind}")]
    ConstraintNotRegistered { kind: ConstraintKind },

    /// A constraint name arriving from the outside was not recognized.
    #[error("{name} is not a known constraint")]
    UnknownConstraint { name: String },
}

impl IntoResponse for CapabilityError {
    fn into_response(self) -> Response {
        match self {
            Self::ConstraintExceeded {
                ref message_id,
                ref arguments,
                ..
            } => {
                let body = DomainErrorDto {
                    error: self.to_string(),
                    message_id: message_id.to_string(),
                    arguments: arguments.clone(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Self::UnknownConstraint { .. } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::ConstraintNotRegistered { .. } => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
