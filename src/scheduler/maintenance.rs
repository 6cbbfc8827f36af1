//! Hourly maintenance: purge of marked spaces and expired tokens.

use chrono::{Duration, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    data::{space::SpaceRepository, user_token::UserTokenRepository},
    error::AppError,
    state::AppState,
};

/// Days between the removal marking of a space and its actual deletion.
const SPACE_REMOVAL_GRACE_DAYS: i64 = 7;

pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();

    // Once an hour, at minute 20.
    let job = Job::new_async("0 20 * * * *", move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            if let Err(e) = run_maintenance(&state).await {
                tracing::error!("Maintenance job error: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

async fn run_maintenance(state: &AppState) -> Result<(), AppError> {
    purge_marked_spaces(state).await?;
    purge_expired_tokens(state).await?;

    Ok(())
}

/// Deletes spaces whose removal marking is older than the grace period.
/// Child resources go with them through the schema's cascades.
async fn purge_marked_spaces(state: &AppState) -> Result<(), AppError> {
    let spaces = SpaceRepository::new(&state.db);
    let cutoff = Utc::now() - Duration::days(SPACE_REMOVAL_GRACE_DAYS);

    for space in spaces.find_marked_before(cutoff).await? {
        tracing::info!(space = %space.id, "Purging space marked for removal");
        spaces.delete(space.id).await?;
    }

    Ok(())
}

async fn purge_expired_tokens(state: &AppState) -> Result<(), AppError> {
    let removed = UserTokenRepository::new(&state.db)
        .delete_expired(Utc::now())
        .await?;

    if removed > 0 {
        tracing::debug!("Removed {removed} expired user token(s)");
    }

    Ok(())
}
