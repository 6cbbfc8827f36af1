//! Webhosting plan endpoints. All plan management is admin-only.

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
    dto::{
        api::{DomainErrorDto, ErrorDto},
        plan::{ChangeConstraintsDto, CreatePlanDto, PlanDto, PlanSyncResultDto, UpdatePlanDto},
    },
    error::AppError,
    middleware::auth::Permission,
    model::plan::CreatePlanParam,
    service::plan::PlanService,
    state::AppState,
};

/// Tag for grouping plan endpoints in OpenAPI documentation
pub static PLAN_TAG: &str = "plan";

/// Create a new plan.
///
/// # Access Control
/// - `Admin` - Only admins can manage plans
#[utoipa::path(
    post,
    path = "/api/admin/plans",
    tag = PLAN_TAG,
    request_body = CreatePlanDto,
    responses(
        (status = 201, description = "Successfully created plan", body = PlanDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_plan(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePlanDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let plan = PlanService::new(&state)
        .create(CreatePlanParam {
            id: Uuid::new_v4(),
            label: payload.label,
            constraints: payload.constraints,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(plan.into_dto())))
}

/// Get paginated plans.
#[utoipa::path(
    get,
    path = "/api/admin/plans",
    tag = PLAN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved plans", body = Vec<PlanDto>),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_plans(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let (plans, _total) = PlanService::new(&state)
        .get_all(params.page(), params.per_page())
        .await?;

    let dto: Vec<_> = plans.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a single plan.
#[utoipa::path(
    get,
    path = "/api/admin/plans/{plan_id}",
    tag = PLAN_TAG,
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved plan", body = PlanDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let Some(plan) = PlanService::new(&state).get(plan_id).await? else {
        return Err(AppError::NotFound("Plan not found".to_string()));
    };

    Ok((StatusCode::OK, Json(plan.into_dto())))
}

/// Rename a plan.
#[utoipa::path(
    put,
    path = "/api/admin/plans/{plan_id}",
    tag = PLAN_TAG,
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    request_body = UpdatePlanDto,
    responses(
        (status = 200, description = "Successfully updated plan", body = PlanDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<Uuid>,
    Json(payload): Json<UpdatePlanDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let plan = PlanService::new(&state).rename(plan_id, payload.label).await?;

    Ok((StatusCode::OK, Json(plan.into_dto())))
}

/// Replace a plan's constraint set.
///
/// Assigning an equal set is a no-op; a different set emits exactly one
/// constraints-changed event.
#[utoipa::path(
    put,
    path = "/api/admin/plans/{plan_id}/constraints",
    tag = PLAN_TAG,
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    request_body = ChangeConstraintsDto,
    responses(
        (status = 200, description = "Successfully changed constraints", body = PlanDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 422, description = "Invalid constraint set", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_constraints(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<Uuid>,
    Json(payload): Json<ChangeConstraintsDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let plan = PlanService::new(&state)
        .change_constraints(plan_id, payload.constraints)
        .await?;

    Ok((StatusCode::OK, Json(plan.into_dto())))
}

/// Push the plan's constraints to every linked space.
#[utoipa::path(
    post,
    path = "/api/admin/plans/{plan_id}/sync",
    tag = PLAN_TAG,
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    responses(
        (status = 200, description = "Constraints pushed to linked spaces", body = PlanSyncResultDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let updated_spaces = PlanService::new(&state).sync_to_spaces(plan_id).await?;

    Ok((
        StatusCode::OK,
        Json(PlanSyncResultDto {
            plan_id,
            updated_spaces,
        }),
    ))
}

/// Delete a plan. Linked spaces keep their copied constraint set.
#[utoipa::path(
    delete,
    path = "/api/admin/plans/{plan_id}",
    tag = PLAN_TAG,
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted plan"),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    PlanService::new(&state).remove(plan_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
