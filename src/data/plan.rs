//! Plan data repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::{event::DomainEvent, plan::Plan},
};

pub struct PlanRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlanRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, plan: &mut Plan) -> Result<Vec<DomainEvent>, AppError> {
        entity::plan::ActiveModel {
            id: ActiveValue::Set(plan.id),
            label: ActiveValue::Set(plan.label.clone()),
            constraints: ActiveValue::Set(plan.constraints.to_json()),
            created_at: ActiveValue::Set(plan.created_at),
            updated_at: ActiveValue::Set(plan.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(plan.events.drain())
    }

    pub async fn update(&self, plan: &mut Plan) -> Result<Vec<DomainEvent>, AppError> {
        entity::plan::ActiveModel {
            id: ActiveValue::Unchanged(plan.id),
            label: ActiveValue::Set(plan.label.clone()),
            constraints: ActiveValue::Set(plan.constraints.to_json()),
            created_at: ActiveValue::Unchanged(plan.created_at),
            updated_at: ActiveValue::Set(plan.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(plan.events.drain())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::Plan::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, AppError> {
        let entity = entity::prelude::Plan::find_by_id(id).one(self.db).await?;

        entity.map(Plan::from_entity).transpose()
    }

    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Plan>, u64), AppError> {
        let paginator = entity::prelude::Plan::find()
            .order_by_asc(entity::plan::Column::Label)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let plans = entities
            .into_iter()
            .map(Plan::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((plans, total))
    }
}
