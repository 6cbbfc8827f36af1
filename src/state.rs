//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned for each request handler
//! through Axum's state extraction. All fields are cheap to clone:
//! `DatabaseConnection` and `reqwest::Client` share pools internally, the
//! rest is reference-counted.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    event::EventBus,
    mailer::Mailer,
    service::{
        capability::CapabilityGuards, domain_usage::DomainNameUsageGuard,
        public_suffix::PublicSuffixService,
    },
    util::hash::EmailHashStrategy,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests (mail API, suffix list).
    pub http_client: reqwest::Client,

    /// Blind-index hash strategy for email lookups.
    pub hash_strategy: Arc<dyn EmailHashStrategy>,

    /// Wrapped transactional mailer.
    pub mailer: Arc<dyn Mailer>,

    /// In-process event bus; domain events drained at save time are
    /// dispatched here synchronously.
    pub events: EventBus,

    /// Constraint guard registry for plan-limit enforcement.
    pub capability_guards: Arc<CapabilityGuards>,

    /// Fan-out usage validators guarding domain-name transfer/removal.
    pub domain_usage_guard: Arc<DomainNameUsageGuard>,

    /// Cached public-suffix list client.
    pub public_suffix: PublicSuffixService,

    /// Application base URL for generating links in mails.
    pub app_url: String,
}
