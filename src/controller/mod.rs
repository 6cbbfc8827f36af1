//! HTTP request handlers.
//!
//! Controllers resolve access control through the `AuthGuard`, convert DTOs
//! into service parameters, and map domain models back into DTOs. Business
//! logic lives in the service layer.

pub mod auth;
pub mod domain_name;
pub mod ftp_user;
pub mod mailbox;
pub mod organization;
pub mod param;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;

use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::AppError, middleware::auth::AuthGuard, model::space::Space,
    service::space::SpaceService, state::AppState,
};

/// Builds the auth guard for a request.
pub(crate) fn auth_guard<'a>(state: &'a AppState, session: &'a Session) -> AuthGuard<'a> {
    AuthGuard::new(&state.db, state.hash_strategy.as_ref(), session)
}

/// Loads the space of a space-scoped route, so its owner can be checked.
pub(crate) async fn space_or_not_found(
    state: &AppState,
    space_id: Uuid,
) -> Result<Space, AppError> {
    SpaceService::new(state)
        .get(space_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Space not found".to_string()))
}
