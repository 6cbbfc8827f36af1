//! Initialization of database, sessions, HTTP client, and shared state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::{
    config::Config,
    error::AppError,
    event::EventBus,
    mailer::HttpApiMailer,
    service::{
        capability::CapabilityGuards, domain_usage::DomainNameUsageGuard,
        public_suffix::PublicSuffixService,
    },
    state::AppState,
    util::hash::HmacHashStrategy,
};

/// Connects to the database and runs pending migrations.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the same SQLite database.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to migrate session store: {e}")))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// HTTP client for external API requests.
///
/// Redirects are disabled so a compromised external endpoint cannot bounce
/// requests at internal services.
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_default()
}

/// Assembles the shared application state.
pub fn build_state(config: &Config, db: DatabaseConnection) -> AppState {
    let http_client = setup_reqwest_client();

    AppState {
        db,
        http_client: http_client.clone(),
        hash_strategy: Arc::new(HmacHashStrategy::new(config.email_hash_key.as_bytes())),
        mailer: Arc::new(HttpApiMailer::new(
            http_client.clone(),
            config.mail_api_url.clone(),
            config.mail_api_token.clone(),
            config.mail_from.clone(),
        )),
        events: EventBus::default(),
        capability_guards: Arc::new(CapabilityGuards::standard()),
        domain_usage_guard: Arc::new(DomainNameUsageGuard::standard()),
        public_suffix: PublicSuffixService::new(http_client, config.public_suffix_url.clone()),
        app_url: config.app_url.clone(),
    }
}

/// Warns when no administrator exists yet and points at the CLI command
/// that registers the first one.
pub async fn check_for_admin(state: &AppState) -> Result<(), AppError> {
    let users = crate::data::user::UserRepository::new(&state.db, state.hash_strategy.as_ref());

    if !users.admin_exists().await? {
        tracing::warn!(
            "No administrator registered yet; run `park-manager administrator register` to create one"
        );
    }

    Ok(())
}

/// Seeds the reserved internal administrator organization.
pub async fn seed_internal_organization(state: &AppState) -> Result<(), AppError> {
    use crate::service::organization::OrganizationService;

    OrganizationService::new(state)
        .ensure_internal_organization()
        .await?;

    Ok(())
}
