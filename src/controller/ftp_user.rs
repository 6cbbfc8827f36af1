//! FTP user endpoints, scoped to a space.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::{auth_guard, space_or_not_found},
    dto::ftp_user::RegisterFtpUserDto,
    error::AppError,
    middleware::auth::Permission,
    model::ftp_user::RegisterFtpUserParam,
    service::ftp_user::FtpUserService,
    state::AppState,
};

/// POST /api/spaces/{space_id}/ftp-users - Register an FTP user.
///
/// Capability-guarded against the space's `ftp_user_count` constraint.
///
/// # Access Control
/// - Owner of the space, or admin
pub async fn register_ftp_user(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<RegisterFtpUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let ftp_user = FtpUserService::new(&state)
        .register(RegisterFtpUserParam {
            id: Uuid::new_v4(),
            space_id,
            domain_name_id: payload.domain_name_id,
            username: payload.username,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ftp_user.into_dto())))
}

/// GET /api/spaces/{space_id}/ftp-users - List a space's FTP users.
pub async fn get_ftp_users(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let ftp_users = FtpUserService::new(&state).list_by_space(space_id).await?;
    let dto: Vec<_> = ftp_users.into_iter().map(|u| u.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// DELETE /api/spaces/{space_id}/ftp-users/{ftp_user_id} - Remove an FTP
/// user.
pub async fn remove_ftp_user(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, ftp_user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let service = FtpUserService::new(&state);
    match service.get(ftp_user_id).await? {
        Some(ftp_user) if ftp_user.space_id == space_id => {
            service.remove(ftp_user_id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(AppError::NotFound("FTP user not found".to_string())),
    }
}
