mod cli;
mod config;
mod controller;
mod data;
mod dto;
mod error;
mod event;
mod mailer;
mod middleware;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{AdministratorCommands, CommandLine, Commands},
    config::Config,
    error::AppError,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let commands = CommandLine::parse();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = startup::build_state(&config, db);

    match commands.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, state).await,
        Commands::Administrator {
            command: AdministratorCommands::Register,
        } => cli::register_administrator::run(&state).await,
    }
}

async fn serve(config: &Config, state: AppState) -> Result<(), AppError> {
    let session = startup::connect_to_session(&state.db).await?;

    startup::seed_internal_organization(&state).await?;
    startup::check_for_admin(&state).await?;

    tracing::info!("Starting server");

    // Background jobs: the per-space task runner, the hourly maintenance
    // purge, and the daily public-suffix refresh.
    let task_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = scheduler::task_runner::start_scheduler(task_state).await {
            tracing::error!("Task runner scheduler error: {}", e);
        }
    });
    let maintenance_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = scheduler::maintenance::start_scheduler(maintenance_state).await {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });
    let suffix_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = scheduler::suffix_refresh::start_scheduler(suffix_state).await {
            tracing::error!("Suffix refresh scheduler error: {}", e);
        }
    });

    let app = router::router()
        .with_state(state)
        .layer(session)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            AppError::InternalError(format!("Failed to bind {}: {e}", config.listen_addr))
        })?;

    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Server error: {e}")))
}
