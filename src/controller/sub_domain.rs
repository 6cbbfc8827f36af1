//! Sub-domain endpoints, scoped to a space.

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
    dto::sub_domain::RegisterSubDomainDto,
    error::AppError,
    middleware::auth::Permission,
    model::sub_domain::RegisterSubDomainParam,
    service::sub_domain::SubDomainService,
    state::AppState,
};

/// POST /api/spaces/{space_id}/sub-domains - Register a sub-domain.
///
/// Capability-guarded against the space's `sub_domain_count` constraint.
///
/// # Access Control
/// - Owner of the space, or admin
pub async fn register_sub_domain(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<RegisterSubDomainDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let sub_domain = SubDomainService::new(&state)
        .register(RegisterSubDomainParam {
            id: Uuid::new_v4(),
            space_id,
            domain_name_id: payload.domain_name_id,
            host: payload.host,
            document_root: payload.document_root,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(sub_domain.into_dto())))
}

/// GET /api/spaces/{space_id}/sub-domains - List a space's sub-domains.
pub async fn get_sub_domains(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let sub_domains = SubDomainService::new(&state).list_by_space(space_id).await?;
    let dto: Vec<_> = sub_domains.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// DELETE /api/spaces/{space_id}/sub-domains/{sub_domain_id} - Remove a
/// sub-domain.
pub async fn remove_sub_domain(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, sub_domain_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let service = SubDomainService::new(&state);
    match service.get(sub_domain_id).await? {
        Some(sub_domain) if sub_domain.space_id == space_id => {
            service.remove(sub_domain_id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(AppError::NotFound("Sub-domain not found".to_string())),
    }
}
