//! Scheduled-task endpoints, scoped to a space.

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
    dto::scheduled_task::{RegisterScheduledTaskDto, SetEnabledDto, UpdateScheduledTaskDto},
    error::AppError,
    middleware::auth::Permission,
    model::scheduled_task::{RegisterScheduledTaskParam, UpdateScheduledTaskParam},
    service::scheduled_task::ScheduledTaskService,
    state::AppState,
};

/// POST /api/spaces/{space_id}/scheduled-tasks - Register a scheduled task.
///
/// The five-field cron expression is validated before the task is stored.
///
/// # Access Control
/// - Owner of the space, or admin
pub async fn register_scheduled_task(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
    Json(payload): Json<RegisterScheduledTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let task = ScheduledTaskService::new(&state)
        .register(RegisterScheduledTaskParam {
            id: Uuid::new_v4(),
            space_id,
            schedule: payload.schedule,
            command: payload.command,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task.into_dto())))
}

/// GET /api/spaces/{space_id}/scheduled-tasks - List a space's tasks.
pub async fn get_scheduled_tasks(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let tasks = ScheduledTaskService::new(&state).list_by_space(space_id).await?;
    let dto: Vec<_> = tasks.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// PUT /api/spaces/{space_id}/scheduled-tasks/{task_id} - Update schedule
/// and command.
pub async fn update_scheduled_task(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateScheduledTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    ensure_task_in_space(&state, task_id, space_id).await?;

    let task = ScheduledTaskService::new(&state)
        .update(UpdateScheduledTaskParam {
            id: task_id,
            space_id,
            schedule: payload.schedule,
            command: payload.command,
        })
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// PUT /api/spaces/{space_id}/scheduled-tasks/{task_id}/enabled - Enable or
/// disable a task.
pub async fn set_scheduled_task_enabled(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SetEnabledDto>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    ensure_task_in_space(&state, task_id, space_id).await?;

    let task = ScheduledTaskService::new(&state)
        .set_enabled(task_id, payload.enabled)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// DELETE /api/spaces/{space_id}/scheduled-tasks/{task_id} - Remove a task.
pub async fn remove_scheduled_task(
    State(state): State<AppState>,
    session: Session,
    Path((space_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    ensure_task_in_space(&state, task_id, space_id).await?;

    ScheduledTaskService::new(&state).remove(task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_task_in_space(
    state: &AppState,
    task_id: Uuid,
    space_id: Uuid,
) -> Result<(), AppError> {
    match ScheduledTaskService::new(state).get(task_id).await? {
        Some(task) if task.space_id == space_id => Ok(()),
        _ => Err(AppError::NotFound("Scheduled task not found".to_string())),
    }
}
