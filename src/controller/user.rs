//! User administration endpoints.

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
    dto::user::{RegisterUserDto, RequestEmailChangeDto},
    error::AppError,
    middleware::auth::Permission,
    model::user::{GetAllUsersParam, RegisterUserParam, SetAdminParam},
    service::user::UserService,
    state::AppState,
};

/// GET /api/admin/users - List users (admin only).
pub async fn get_all_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state)
        .get_all_users(GetAllUsersParam {
            page: params.page(),
            per_page: params.per_page(),
        })
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// GET /api/admin/users/{user_id} - Get a user (admin only).
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let Some(user) = UserService::new(&state).get_user(user_id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/admin/users - Register a user or administrator (admin only).
pub async fn register_user(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state)
        .register(RegisterUserParam {
            id: Uuid::new_v4(),
            display_name: payload.display_name,
            email: payload.email,
            password: payload.password,
            admin: payload.admin,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// PUT /api/admin/users/{user_id}/admin - Grant admin privileges.
pub async fn add_admin(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state)
        .set_admin(SetAdminParam {
            user_id,
            admin: true,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/users/{user_id}/admin - Revoke admin privileges.
pub async fn remove_admin(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state)
        .set_admin(SetAdminParam {
            user_id,
            admin: false,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{user_id}/email-change - Request an email-address change.
///
/// Users may change their own address; admins may change anyone's. The
/// confirmation token goes to the new address.
pub async fn request_email_change(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RequestEmailChangeDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = auth_guard(&state, &session).require(&[]).await?;

    if actor.id != user_id && !actor.admin {
        return Err(crate::error::auth::AuthError::AccessDenied(
            actor.id,
            "cannot change another user's email".to_string(),
        )
        .into());
    }

    UserService::new(&state)
        .request_email_change(user_id, &payload.email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
