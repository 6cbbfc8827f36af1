//! Scheduled-task service.
//!
//! Tasks carry a five-field cron expression validated at registration. The
//! scheduler ticks once a minute and runs every enabled task whose
//! expression matches the current UTC minute; `last_run_at` keeps execution
//! at most once per matching minute.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    data::scheduled_task::ScheduledTaskRepository,
    error::{domain::DomainError, AppError},
    model::{
        event::DomainEvent,
        scheduled_task::{RegisterScheduledTaskParam, ScheduledTask, UpdateScheduledTaskParam},
    },
    service::ftp_user::load_active_space,
    state::AppState,
    util::cron::CronSchedule,
};

pub struct ScheduledTaskService<'a> {
    state: &'a AppState,
}

impl<'a> ScheduledTaskService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn tasks(&self) -> ScheduledTaskRepository<'_> {
        ScheduledTaskRepository::new(&self.state.db)
    }

    pub async fn register(
        &self,
        param: RegisterScheduledTaskParam,
    ) -> Result<ScheduledTask, AppError> {
        load_active_space(self.state, param.space_id).await?;
        validate_schedule(&param.schedule)?;

        let task = ScheduledTask::register(param.id, param.space_id, param.schedule, param.command);
        self.tasks().insert(&task).await?;

        Ok(task)
    }

    pub async fn update(&self, param: UpdateScheduledTaskParam) -> Result<ScheduledTask, AppError> {
        validate_schedule(&param.schedule)?;

        let tasks = self.tasks();
        let Some(mut task) = tasks.find_by_id(param.id).await? else {
            return Err(AppError::NotFound("Scheduled task not found".to_string()));
        };
        if task.space_id != param.space_id {
            return Err(AppError::NotFound("Scheduled task not found".to_string()));
        }

        task.update(param.schedule, param.command);
        tasks.update(&task).await?;

        Ok(task)
    }

    pub async fn set_enabled(&self, id: Uuid, enabled: bool) -> Result<ScheduledTask, AppError> {
        let tasks = self.tasks();
        let Some(mut task) = tasks.find_by_id(id).await? else {
            return Err(AppError::NotFound("Scheduled task not found".to_string()));
        };

        task.set_enabled(enabled);
        tasks.update(&task).await?;

        Ok(task)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ScheduledTask>, AppError> {
        self.tasks().find_by_id(id).await
    }

    pub async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<ScheduledTask>, AppError> {
        self.tasks().find_by_space(space_id).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let tasks = self.tasks();

        if tasks.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Scheduled task not found".to_string()));
        }

        tasks.delete(id).await
    }

    /// Runs every enabled task whose schedule matches the minute containing
    /// `now`. Called by the scheduler tick.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tasks that ran
    pub async fn run_due(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let tasks = self.tasks();
        let mut ran = 0;

        for task in tasks.find_enabled().await? {
            let schedule = match CronSchedule::parse(&task.schedule) {
                Ok(schedule) => schedule,
                Err(err) => {
                    // Validated at write time; a bad row only gets skipped.
                    tracing::warn!(task = %task.id, "Skipping task with bad schedule: {err}");
                    continue;
                }
            };

            if !schedule.matches(now) {
                continue;
            }

            // Already ran in this minute (e.g. an overlapping tick).
            if let Some(last_run) = task.last_run_at {
                if now - last_run < Duration::minutes(1) {
                    continue;
                }
            }

            tracing::info!(
                task = %task.id,
                space = %task.space_id,
                command = %task.command,
                "Running scheduled task"
            );

            tasks.set_last_run(task.id, now).await?;
            self.state
                .events
                .dispatch(&DomainEvent::ScheduledTaskRan {
                    task_id: task.id,
                    space_id: task.space_id,
                    command: task.command.clone(),
                })
                .await;
            ran += 1;
        }

        Ok(ran)
    }
}

fn validate_schedule(expression: &str) -> Result<(), AppError> {
    CronSchedule::parse(expression).map_err(|_| DomainError::InvalidCronExpression {
        expression: expression.to_string(),
    })?;

    Ok(())
}
