//! Organization endpoints.

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
        organization::{AddMemberDto, CreateOrganizationDto, OrganizationDto, UpdateOrganizationDto},
    },
    error::AppError,
    middleware::auth::Permission,
    model::{
        organization::{AccessLevel, AddMemberParam, CreateOrganizationParam},
        owner::Owner,
    },
    service::organization::OrganizationService,
    state::AppState,
};

/// Tag for grouping organization endpoints in OpenAPI documentation
pub static ORGANIZATION_TAG: &str = "organization";

/// Create a new organization.
///
/// # Access Control
/// - `Admin` - Only admins can create organizations
#[utoipa::path(
    post,
    path = "/api/admin/organizations",
    tag = ORGANIZATION_TAG,
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Successfully created organization", body = OrganizationDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_organization(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    let organization = OrganizationService::new(&state)
        .create(CreateOrganizationParam {
            id: Uuid::new_v4(),
            name: payload.name,
            internal: false,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(organization.into_dto())))
}

/// Get paginated organizations.
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = ORGANIZATION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved organizations", body = Vec<OrganizationDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_organizations(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session).require(&[]).await?;

    let (organizations, _total) = OrganizationService::new(&state)
        .get_all(params.page(), params.per_page())
        .await?;

    let dto: Vec<_> = organizations.into_iter().map(|o| o.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a single organization.
#[utoipa::path(
    get,
    path = "/api/organizations/{organization_id}",
    tag = ORGANIZATION_TAG,
    params(
        ("organization_id" = Uuid, Path, description = "Organization ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved organization", body = OrganizationDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_organization(
    State(state): State<AppState>,
    session: Session,
    Path(organization_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session).require(&[]).await?;

    let Some(organization) = OrganizationService::new(&state).get(organization_id).await? else {
        return Err(AppError::NotFound("Organization not found".to_string()));
    };

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

/// Rename an organization.
///
/// # Access Control
/// - Manager-level membership of the organization, or admin
pub async fn update_organization(
    State(state): State<AppState>,
    session: Session,
    Path(organization_id): Path<Uuid>,
    Json(payload): Json<UpdateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(Owner::Organization(organization_id))])
        .await?;

    let organization = OrganizationService::new(&state)
        .rename(organization_id, payload.name)
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

/// Remove an organization.
///
/// Blocked while the organization still owns spaces or domain names, and
/// always blocked for the reserved internal organization; the conflict
/// response lists the blocking entities by type.
#[utoipa::path(
    delete,
    path = "/api/admin/organizations/{organization_id}",
    tag = ORGANIZATION_TAG,
    params(
        ("organization_id" = Uuid, Path, description = "Organization ID")
    ),
    responses(
        (status = 204, description = "Successfully removed organization"),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 409, description = "Organization is internal or still owns resources", body = DomainErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_organization(
    State(state): State<AppState>,
    session: Session,
    Path(organization_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::Admin])
        .await?;

    OrganizationService::new(&state).remove(organization_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the members of an organization.
pub async fn get_members(
    State(state): State<AppState>,
    session: Session,
    Path(organization_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(Owner::Organization(organization_id))])
        .await?;

    let members = OrganizationService::new(&state)
        .get_members(organization_id)
        .await?;

    let dto: Vec<_> = members.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Add a member or change an existing member's access level.
///
/// Re-adding a user replaces their level; a user is never duplicated.
pub async fn add_member(
    State(state): State<AppState>,
    session: Session,
    Path((organization_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AddMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(Owner::Organization(organization_id))])
        .await?;

    let Some(level) = AccessLevel::from_str(&payload.level) else {
        return Err(AppError::BadRequest(format!(
            "Unknown access level: {}",
            payload.level
        )));
    };

    let member = OrganizationService::new(&state)
        .add_member(AddMemberParam {
            organization_id,
            user_id,
            level,
        })
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Remove a member from an organization.
pub async fn remove_member(
    State(state): State<AppState>,
    session: Session,
    Path((organization_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    auth_guard(&state, &session)
        .require(&[Permission::OwnerAccess(Owner::Organization(organization_id))])
        .await?;

    OrganizationService::new(&state)
        .remove_member(organization_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
