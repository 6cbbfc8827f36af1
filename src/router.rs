//! Route configuration and API documentation.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    controller::{
        auth, domain_name, ftp_user, mailbox, organization, plan, scheduled_task, space,
        sub_domain, user,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        organization::create_organization,
        organization::get_organizations,
        organization::get_organization,
        organization::remove_organization,
        plan::create_plan,
        plan::get_plans,
        plan::get_plan,
        plan::update_plan,
        plan::change_constraints,
        plan::sync_plan,
        plan::delete_plan,
        domain_name::register_domain_name,
        domain_name::get_domain_names,
        domain_name::assign_domain_name,
        domain_name::mark_primary,
        domain_name::transfer_domain_name,
        domain_name::remove_domain_name,
    ),
    components(schemas(
        crate::dto::api::ErrorDto,
        crate::dto::api::DomainErrorDto,
        crate::dto::organization::OrganizationDto,
        crate::dto::organization::CreateOrganizationDto,
        crate::dto::plan::PlanDto,
        crate::dto::plan::CreatePlanDto,
        crate::dto::plan::UpdatePlanDto,
        crate::dto::plan::ChangeConstraintsDto,
        crate::dto::plan::PlanSyncResultDto,
        crate::dto::domain_name::DomainNameDto,
        crate::dto::domain_name::RegisterDomainNameDto,
        crate::dto::domain_name::AssignDomainNameDto,
        crate::dto::domain_name::TransferDomainNameDto,
        crate::model::constraint::Constraints,
    ))
)]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth_router())
        .merge(user_router())
        .merge(organization_router())
        .merge(plan_router())
        .merge(space_router())
        .merge(domain_name_router())
        .merge(space_resource_router())
        .route("/api/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Auth routes, rate limited by peer IP.
fn auth_router() -> Router<AppState> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("valid rate limit configuration"),
    );

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_current_user))
        .route("/api/password-reset", post(auth::request_password_reset))
        .route(
            "/api/password-reset/confirm/{token}",
            post(auth::confirm_password_reset),
        )
        .route(
            "/api/confirm-email-address-change/{token}",
            post(auth::confirm_email_change),
        )
        .layer(GovernorLayer {
            config: governor_conf,
        })
}

fn user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/users",
            get(user::get_all_users).post(user::register_user),
        )
        .route("/api/admin/users/{user_id}", get(user::get_user))
        .route(
            "/api/admin/users/{user_id}/admin",
            put(user::add_admin).delete(user::remove_admin),
        )
        .route(
            "/api/users/{user_id}/email-change",
            post(user::request_email_change),
        )
}

fn organization_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/organizations",
            post(organization::create_organization),
        )
        .route(
            "/api/admin/organizations/{organization_id}",
            delete(organization::remove_organization),
        )
        .route("/api/organizations", get(organization::get_organizations))
        .route(
            "/api/organizations/{organization_id}",
            get(organization::get_organization).put(organization::update_organization),
        )
        .route(
            "/api/organizations/{organization_id}/members",
            get(organization::get_members),
        )
        .route(
            "/api/organizations/{organization_id}/members/{user_id}",
            put(organization::add_member).delete(organization::remove_member),
        )
}

fn plan_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/plans",
            get(plan::get_plans).post(plan::create_plan),
        )
        .route(
            "/api/admin/plans/{plan_id}",
            get(plan::get_plan)
                .put(plan::update_plan)
                .delete(plan::delete_plan),
        )
        .route(
            "/api/admin/plans/{plan_id}/constraints",
            put(plan::change_constraints),
        )
        .route("/api/admin/plans/{plan_id}/sync", post(plan::sync_plan))
}

fn space_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/spaces",
            get(space::get_spaces).post(space::register_space),
        )
        .route("/api/admin/spaces/{space_id}/plan", put(space::assign_plan))
        .route(
            "/api/admin/spaces/{space_id}/constraints",
            put(space::set_constraints),
        )
        .route(
            "/api/admin/spaces/{space_id}/owner",
            put(space::transfer_owner),
        )
        .route(
            "/api/spaces/{space_id}",
            get(space::get_space).delete(space::mark_for_removal),
        )
}

fn domain_name_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/domain-names",
            get(domain_name::get_domain_names).post(domain_name::register_domain_name),
        )
        .route(
            "/api/admin/domain-names/{domain_name_id}",
            delete(domain_name::remove_domain_name),
        )
        .route(
            "/api/admin/domain-names/{domain_name_id}/space",
            put(domain_name::assign_domain_name),
        )
        .route(
            "/api/admin/domain-names/{domain_name_id}/primary",
            put(domain_name::mark_primary),
        )
        .route(
            "/api/admin/domain-names/{domain_name_id}/transfer",
            put(domain_name::transfer_domain_name),
        )
        .route(
            "/api/domain-names/{domain_name_id}",
            get(domain_name::get_domain_name),
        )
        .route(
            "/api/spaces/{space_id}/domain-names",
            get(domain_name::get_space_domain_names),
        )
}

/// Per-space child resources: FTP users, mailboxes, forwards, sub-domains,
/// scheduled tasks.
fn space_resource_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/spaces/{space_id}/ftp-users",
            get(ftp_user::get_ftp_users).post(ftp_user::register_ftp_user),
        )
        .route(
            "/api/spaces/{space_id}/ftp-users/{ftp_user_id}",
            delete(ftp_user::remove_ftp_user),
        )
        .route(
            "/api/spaces/{space_id}/mailboxes",
            get(mailbox::get_mailboxes).post(mailbox::register_mailbox),
        )
        .route(
            "/api/spaces/{space_id}/mailboxes/{mailbox_id}",
            delete(mailbox::remove_mailbox),
        )
        .route(
            "/api/spaces/{space_id}/mailboxes/{mailbox_id}/size",
            put(mailbox::resize_mailbox),
        )
        .route(
            "/api/spaces/{space_id}/mail-forwards",
            get(mailbox::get_mail_forwards).post(mailbox::register_mail_forward),
        )
        .route(
            "/api/spaces/{space_id}/mail-forwards/{forward_id}",
            delete(mailbox::remove_mail_forward),
        )
        .route(
            "/api/spaces/{space_id}/sub-domains",
            get(sub_domain::get_sub_domains).post(sub_domain::register_sub_domain),
        )
        .route(
            "/api/spaces/{space_id}/sub-domains/{sub_domain_id}",
            delete(sub_domain::remove_sub_domain),
        )
        .route(
            "/api/spaces/{space_id}/scheduled-tasks",
            get(scheduled_task::get_scheduled_tasks).post(scheduled_task::register_scheduled_task),
        )
        .route(
            "/api/spaces/{space_id}/scheduled-tasks/{task_id}",
            put(scheduled_task::update_scheduled_task)
                .delete(scheduled_task::remove_scheduled_task),
        )
        .route(
            "/api/spaces/{space_id}/scheduled-tasks/{task_id}/enabled",
            put(scheduled_task::set_scheduled_task_enabled),
        )
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
