//! Scheduled-task runner.
//!
//! Ticks once a minute and runs every enabled task whose cron expression
//! matches the current UTC minute.

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::scheduled_task::ScheduledTaskService, state::AppState};

pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();

    // Tick at second 0 of every minute.
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            match ScheduledTaskService::new(&state).run_due(Utc::now()).await {
                Ok(0) => {}
                Ok(ran) => tracing::debug!("Ran {ran} scheduled task(s)"),
                Err(e) => tracing::error!("Error running scheduled tasks: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled task runner started");

    Ok(())
}
