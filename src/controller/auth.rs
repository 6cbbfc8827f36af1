//! Authentication endpoints: login, logout, password reset, email-change
//! confirmation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    controller::auth_guard,
    dto::auth::{ConfirmPasswordResetDto, LoginDto, RequestPasswordResetDto, SessionUserDto},
    error::AppError,
    middleware::session::AuthSession,
    service::user::UserService,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state)
        .login(&payload.email, &payload.password)
        .await?;

    // Rotate the session id on privilege change.
    session.cycle_id().await?;
    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(SessionUserDto {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            admin: user.admin,
        }),
    ))
}

pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_current_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_guard(&state, &session).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(SessionUserDto {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            admin: user.admin,
        }),
    ))
}

/// POST /api/password-reset - Start a password reset.
///
/// Always answers 204: whether the email is registered is never revealed.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<RequestPasswordResetDto>,
) -> Result<impl IntoResponse, AppError> {
    UserService::new(&state)
        .request_password_reset(&payload.email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/password-reset/confirm/{token} - Complete a password reset.
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ConfirmPasswordResetDto>,
) -> Result<impl IntoResponse, AppError> {
    UserService::new(&state)
        .confirm_password_reset(&token, &payload.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/confirm-email-address-change/{token} - Apply a confirmed email
/// change.
pub async fn confirm_email_change(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state).confirm_email_change(&token).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
