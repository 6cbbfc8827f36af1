//! Domain-name endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::{auth_guard, param::PaginationParam, space_or_not_found},
    dto::{
        api::{DomainErrorDto, ErrorDto},
        domain_name::{AssignDomainNameDto, DomainNameDto, RegisterDomainNameDto, TransferDomainNameDto},
    },
    error::AppError,
    middleware::auth::Permission,
    service::domain_name::DomainNameService,
    state::AppState,
};

/// Tag for grouping domain-name endpoints in OpenAPI documentation
pub static DOMAIN_NAME_TAG: &str = "domain_name";

/// Register a domain name, optionally assigning it to a space.
///
/// The FQDN is split and validated against the public-suffix list. The
/// first domain name assigned to a space becomes its primary.
///
/// # Access Control
/// - `Admin` - Only admins can register domain names
#[utoipa::path(
    post,
    path = "/api/admin/domain-names",
    tag = DOMAIN_NAME_TAG,
    request_body = RegisterDomainNameDto,
    responses(
        (status = 201, description = "Successfully registered domain name", body = DomainNameDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 409, description = "Domain name already registered", body = DomainErrorDto),
        (status = 422, description = "Unknown public suffix", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_domain_name(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterDomainNameDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let domain_name = DomainNameService::new(&state)
        .register(&payload.fqdn, Uuid::new_v4(), payload.space_id)
        .await?;

    Ok((StatusCode::CREATED, Json(domain_name.into_dto())))
}

/// Get paginated domain names.
#[utoipa::path(
    get,
    path = "/api/admin/domain-names",
    tag = DOMAIN_NAME_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved domain names", body = Vec<DomainNameDto>),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_domain_names(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let (domain_names, _total) = DomainNameService::new(&state)
        .get_all(params.page(), params.per_page())
        .await?;

    let dto: Vec<_> = domain_names.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a single domain name.
pub async fn get_domain_name(
    State(state): State<AppState>,
    session: Session,
    Path(domain_name_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session).require(&[]).await?;

    let Some(domain_name) = DomainNameService::new(&state).get(domain_name_id).await? else {
        return Err(AppError::NotFound("Domain name not found".to_string()));
    };

    Ok((StatusCode::OK, Json(domain_name.into_dto())))
}

/// List a space's domain names.
pub async fn get_space_domain_names(
    State(state): State<AppState>,
    session: Session,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = space_or_not_found(&state, space_id).await?;
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(space.owner)])
        .await?;

    let domain_names = DomainNameService::new(&state).list_by_space(space_id).await?;
    let dto: Vec<_> = domain_names.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Assign an unassigned domain name to a space.
#[utoipa::path(
    put,
    path = "/api/admin/domain-names/{domain_name_id}/space",
    tag = DOMAIN_NAME_TAG,
    params(
        ("domain_name_id" = Uuid, Path, description = "Domain name ID")
    ),
    request_body = AssignDomainNameDto,
    responses(
        (status = 200, description = "Successfully assigned domain name", body = DomainNameDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Domain name or space not found", body = ErrorDto),
        (status = 409, description = "Domain name already assigned", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_domain_name(
    State(state): State<AppState>,
    session: Session,
    Path(domain_name_id): Path<Uuid>,
    Json(payload): Json<AssignDomainNameDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let domain_name = DomainNameService::new(&state)
        .assign_to_space(domain_name_id, payload.space_id)
        .await?;

    Ok((StatusCode::OK, Json(domain_name.into_dto())))
}

/// Mark a domain name primary for its space, swapping the previous primary.
#[utoipa::path(
    put,
    path = "/api/admin/domain-names/{domain_name_id}/primary",
    tag = DOMAIN_NAME_TAG,
    params(
        ("domain_name_id" = Uuid, Path, description = "Domain name ID")
    ),
    responses(
        (status = 200, description = "Successfully marked primary", body = DomainNameDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Domain name not found", body = ErrorDto),
        (status = 409, description = "Domain name not assigned to a space", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_primary(
    State(state): State<AppState>,
    session: Session,
    Path(domain_name_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let domain_name = DomainNameService::new(&state).mark_primary(domain_name_id).await?;

    Ok((StatusCode::OK, Json(domain_name.into_dto())))
}

/// Transfer a domain name to another space.
///
/// Blocked while primary, and while mailboxes, forwards, FTP users or
/// sub-domains of the current space still reference it (the conflict lists
/// the blocking entities, capped at 20).
#[utoipa::path(
    put,
    path = "/api/admin/domain-names/{domain_name_id}/transfer",
    tag = DOMAIN_NAME_TAG,
    params(
        ("domain_name_id" = Uuid, Path, description = "Domain name ID")
    ),
    request_body = TransferDomainNameDto,
    responses(
        (status = 200, description = "Successfully transferred domain name", body = DomainNameDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Domain name or target space not found", body = ErrorDto),
        (status = 409, description = "Domain name is primary or still in use", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn transfer_domain_name(
    State(state): State<AppState>,
    session: Session,
    Path(domain_name_id): Path<Uuid>,
    Json(payload): Json<TransferDomainNameDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let domain_name = DomainNameService::new(&state)
        .transfer(domain_name_id, payload.to_space_id)
        .await?;

    Ok((StatusCode::OK, Json(domain_name.into_dto())))
}

/// Remove a domain name. Same guards as a transfer, reported with the
/// removal error type.
#[utoipa::path(
    delete,
    path = "/api/admin/domain-names/{domain_name_id}",
    tag = DOMAIN_NAME_TAG,
    params(
        ("domain_name_id" = Uuid, Path, description = "Domain name ID")
    ),
    responses(
        (status = 204, description = "Successfully removed domain name"),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Domain name not found", body = ErrorDto),
        (status = 409, description = "Domain name is primary or still in use", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_domain_name(
    State(state): State<AppState>,
    session: Session,
    Path(domain_name_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    DomainNameService::new(&state).remove(domain_name_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
