mod domain_name;
mod organization;
mod plan;
mod scheduled_task;
mod user;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    event::EventBus,
    mailer::RecordingMailer,
    service::{
        capability::CapabilityGuards,
        domain_usage::DomainNameUsageGuard,
        public_suffix::{PublicSuffixService, SuffixList},
    },
    state::AppState,
    util::hash::TestHashStrategy,
};

/// Suffix rules available to service tests without network access.
const TEST_SUFFIXES: &str = "com\nnet\norg\nuk\nco.uk\n";

/// Builds an application state around the given test database: transparent
/// email hashing, a recording mailer, no event listeners, and a canned
/// public-suffix list.
pub(crate) fn test_state(db: &DatabaseConnection) -> (AppState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let client = reqwest::Client::new();

    let state = AppState {
        db: db.clone(),
        http_client: client.clone(),
        hash_strategy: Arc::new(TestHashStrategy),
        mailer: mailer.clone(),
        events: EventBus::noop(),
        capability_guards: Arc::new(CapabilityGuards::standard()),
        domain_usage_guard: Arc::new(DomainNameUsageGuard::standard()),
        public_suffix: PublicSuffixService::with_list(
            client,
            "http://127.0.0.1/list.dat",
            SuffixList::parse(TEST_SUFFIXES),
        ),
        app_url: "http://localhost:8080".to_string(),
    };

    (state, mailer)
}
