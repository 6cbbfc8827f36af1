//! Space endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::{auth_guard, param::PaginationParam},
    dto::space::{AssignPlanDto, RegisterSpaceDto, SetConstraintsDto, TransferOwnerDto},
    error::AppError,
    middleware::auth::Permission,
    model::{owner::Owner, space::RegisterSpaceParam},
    service::space::SpaceService,
    state::AppState,
};

/// POST /api/admin/spaces - Register a space (admin only).
pub async fn register_space(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterSpaceDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let owner = Owner::from_columns(payload.owner_user_id, payload.owner_organization_id)?;

    let space = SpaceService::new(&state)
        .register(RegisterSpaceParam {
            id: Uuid::new_v4(),
            owner,
            plan_id: payload.plan_id,
            constraints: payload.constraints,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(space.into_dto())))
}

/// GET /api/admin/spaces - List all spaces (admin only).
pub async fn get_spaces(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let (spaces, _total) = SpaceService::new(&state)
        .get_all(params.page(), params.per_page())
        .await?;

    let dto: Vec<_> = spaces.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// GET /api/spaces/{space_id} - Get a space.
///
/// # Access Control
/// - Owner of the space (user identity or manager-level organization
///   membership), or admin
pub async fn get_space(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let Some(space) = SpaceService::new(&state).get(space_id).await? else {
        return Err(AppError::NotFound("Space not found".to_string()));
    };

    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

/// PUT /api/admin/spaces/{space_id}/plan - Assign a plan (admin only).
pub async fn assign_plan(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<AssignPlanDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let space = SpaceService::new(&state)
        .assign_plan(space_id, payload.plan_id)
        .await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

/// PUT /api/admin/spaces/{space_id}/constraints - Set individual
/// constraints, detaching the space from its plan (admin only).
pub async fn set_constraints(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<SetConstraintsDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let space = SpaceService::new(&state)
        .set_constraints(space_id, payload.constraints)
        .await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

/// PUT /api/admin/spaces/{space_id}/owner - Transfer ownership (admin only).
pub async fn transfer_owner(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<TransferOwnerDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let owner = Owner::from_columns(payload.owner_user_id, payload.owner_organization_id)?;
    let space = SpaceService::new(&state).transfer_owner(space_id, owner).await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

/// DELETE /api/spaces/{space_id} - Mark a space for removal.
///
/// The space is deleted by the purge job after the grace period.
pub async fn mark_for_removal(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let Some(space) = SpaceService::new(&state).get(space_id).await? else {
        return Err(AppError::NotFound("Space not found".to_string()));
    };

    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let space = SpaceService::new(&state).mark_for_removal(space_id).await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}
