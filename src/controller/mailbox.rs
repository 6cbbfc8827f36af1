//! Mailbox and mail-forward endpoints, scoped to a space.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::{auth_guard, space_or_not_found},
    dto::mailbox::{RegisterMailForwardDto, RegisterMailboxDto},
    error::AppError,
    middleware::auth::Permission,
    model::mailbox::{RegisterMailForwardParam, RegisterMailboxParam},
    service::mailbox::MailboxService,
    state::AppState,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ResizeMailboxDto {
    /// New size quota in bytes.
    pub size_quota: i64,
}

/// POST /api/spaces/{space_id}/mailboxes - Register a mailbox.
///
/// Capability-guarded against `mailbox_count` and `storage_quota`.
///
/// # Access Control
/// - Owner of the space, or admin
pub async fn register_mailbox(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<RegisterMailboxDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let mailbox = MailboxService::new(&state)
        .register(RegisterMailboxParam {
            id: Uuid::new_v4(),
            space_id,
            domain_name_id: payload.domain_name_id,
            address: payload.address,
            size_quota: payload.size_quota,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(mailbox.into_dto())))
}

/// GET /api/spaces/{space_id}/mailboxes - List a space's mailboxes.
pub async fn get_mailboxes(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let mailboxes = MailboxService::new(&state).list_by_space(space_id).await?;
    let dto: Vec<_> = mailboxes.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// PUT /api/spaces/{space_id}/mailboxes/{mailbox_id}/size - Resize a
/// mailbox; growth is checked against the storage quota.
pub async fn resize_mailbox(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, mailbox_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ResizeMailboxDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let service = MailboxService::new(&state);
    match service.get(mailbox_id).await? {
        Some(mailbox) if mailbox.space_id == space_id => {
            let mailbox = service.resize(mailbox_id, payload.size_quota).await?;
            Ok((StatusCode::OK, Json(mailbox.into_dto())))
        }
        _ => Err(AppError::NotFound("Mailbox not found".to_string())),
    }
}

/// DELETE /api/spaces/{space_id}/mailboxes/{mailbox_id} - Remove a mailbox.
pub async fn remove_mailbox(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, mailbox_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let service = MailboxService::new(&state);
    match service.get(mailbox_id).await? {
        Some(mailbox) if mailbox.space_id == space_id => {
            service.remove(mailbox_id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(AppError::NotFound("Mailbox not found".to_string())),
    }
}

/// POST /api/spaces/{space_id}/mail-forwards - Register a mail forward,
/// capability-guarded against `mail_forward_count`.
pub async fn register_mail_forward(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<RegisterMailForwardDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let forward = MailboxService::new(&state)
        .register_forward(RegisterMailForwardParam {
            id: Uuid::new_v4(),
            space_id,
            domain_name_id: payload.domain_name_id,
            address: payload.address,
            destination: payload.destination,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(forward.into_dto())))
}

/// GET /api/spaces/{space_id}/mail-forwards - List a space's forwards.
pub async fn get_mail_forwards(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let forwards = MailboxService::new(&state)
        .list_forwards_by_space(space_id)
        .await?;
    let dto: Vec<_> = forwards.into_iter().map(|f| f.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// DELETE /api/spaces/{space_id}/mail-forwards/{forward_id} - Remove a
/// mail forward.
pub async fn remove_mail_forward(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, forward_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    MailboxService::new(&state).remove_forward(forward_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
