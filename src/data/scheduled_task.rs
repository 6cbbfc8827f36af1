//! Scheduled-task data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::{error::AppError, model::scheduled_task::ScheduledTask};

pub struct ScheduledTaskRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduledTaskRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, task: &ScheduledTask) -> Result<(), AppError> {
        entity::scheduled_task::ActiveModel {
            id: ActiveValue::Set(task.id),
            space_id: ActiveValue::Set(task.space_id),
            schedule: ActiveValue::Set(task.schedule.clone()),
            command: ActiveValue::Set(task.command.clone()),
            enabled: ActiveValue::Set(task.enabled),
            last_run_at: ActiveValue::Set(task.last_run_at),
            created_at: ActiveValue::Set(task.created_at),
            updated_at: ActiveValue::Set(task.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn update(&self, task: &ScheduledTask) -> Result<(), AppError> {
        entity::scheduled_task::ActiveModel {
            id: ActiveValue::Unchanged(task.id),
            space_id: ActiveValue::Set(task.space_id),
            schedule: ActiveValue::Set(task.schedule.clone()),
            command: ActiveValue::Set(task.command.clone()),
            enabled: ActiveValue::Set(task.enabled),
            last_run_at: ActiveValue::Set(task.last_run_at),
            created_at: ActiveValue::Unchanged(task.created_at),
            updated_at: ActiveValue::Set(task.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduledTask>, AppError> {
        let entity = entity::prelude::ScheduledTask::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(ScheduledTask::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<ScheduledTask>, AppError> {
        let entities = entity::prelude::ScheduledTask::find()
            .filter(entity::scheduled_task::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::scheduled_task::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ScheduledTask::from_entity).collect())
    }

    /// All enabled tasks, loaded by the scheduler tick.
    pub async fn find_enabled(&self) -> Result<Vec<ScheduledTask>, AppError> {
        let entities = entity::prelude::ScheduledTask::find()
            .filter(entity::scheduled_task::Column::Enabled.eq(true))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ScheduledTask::from_entity).collect())
    }

    /// Stamps the last execution time after a run.
    pub async fn set_last_run(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        entity::prelude::ScheduledTask::update_many()
            .filter(entity::scheduled_task::Column::Id.eq(id))
            .col_expr(
                entity::scheduled_task::Column::LastRunAt,
                sea_orm::sea_query::Expr::value(at),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::ScheduledTask::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
