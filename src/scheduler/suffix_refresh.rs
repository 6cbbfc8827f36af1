//! Daily refresh of the cached public-suffix list.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, state::AppState};

pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    // Warm the cache once at startup; a failure here is non-fatal, the
    // client falls back until the next refresh succeeds.
    if let Err(e) = state.public_suffix.refresh().await {
        tracing::warn!("Initial public suffix list fetch failed: {}", e);
    }

    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();

    // Daily at 03:40 UTC.
    let job = Job::new_async("0 40 3 * * *", move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            if let Err(e) = state.public_suffix.refresh().await {
                tracing::error!("Public suffix list refresh failed: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Public suffix refresh scheduler started");

    Ok(())
}
