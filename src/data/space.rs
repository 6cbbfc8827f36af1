//! Space data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::{event::DomainEvent, space::Space},
};

pub struct SpaceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SpaceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, space: &mut Space) -> Result<Vec<DomainEvent>, AppError> {
        let (owner_user_id, owner_organization_id) = space.owner.into_columns();

        entity::space::ActiveModel {
            id: ActiveValue::Set(space.id),
            owner_user_id: ActiveValue::Set(owner_user_id),
            owner_organization_id: ActiveValue::Set(owner_organization_id),
            plan_id: ActiveValue::Set(space.plan_id),
            constraints: ActiveValue::Set(space.constraints.to_json()),
            marked_for_removal_at: ActiveValue::Set(space.marked_for_removal_at),
            created_at: ActiveValue::Set(space.created_at),
            updated_at: ActiveValue::Set(space.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(space.events.drain())
    }

    pub async fn update(&self, space: &mut Space) -> Result<Vec<DomainEvent>, AppError> {
        let (owner_user_id, owner_organization_id) = space.owner.into_columns();

        entity::space::ActiveModel {
            id: ActiveValue::Unchanged(space.id),
            owner_user_id: ActiveValue::Set(owner_user_id),
            owner_organization_id: ActiveValue::Set(owner_organization_id),
            plan_id: ActiveValue::Set(space.plan_id),
            constraints: ActiveValue::Set(space.constraints.to_json()),
            marked_for_removal_at: ActiveValue::Set(space.marked_for_removal_at),
            created_at: ActiveValue::Unchanged(space.created_at),
            updated_at: ActiveValue::Set(space.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(space.events.drain())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Space>, AppError> {
        let entity = entity::prelude::Space::find_by_id(id).one(self.db).await?;

        entity.map(Space::from_entity).transpose()
    }

    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Space>, u64), AppError> {
        let paginator = entity::prelude::Space::find()
            .order_by_asc(entity::space::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let spaces = entities
            .into_iter()
            .map(Space::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((spaces, total))
    }

    /// Spaces owned by an organization, used by the removal blocking check.
    pub async fn find_by_owner_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<Space>, AppError> {
        let entities = entity::prelude::Space::find()
            .filter(entity::space::Column::OwnerOrganizationId.eq(organization_id))
            .all(self.db)
            .await?;

        entities.into_iter().map(Space::from_entity).collect()
    }

    pub async fn find_by_owner_user(&self, user_id: Uuid) -> Result<Vec<Space>, AppError> {
        let entities = entity::prelude::Space::find()
            .filter(entity::space::Column::OwnerUserId.eq(user_id))
            .all(self.db)
            .await?;

        entities.into_iter().map(Space::from_entity).collect()
    }

    /// Spaces that use the given plan, for constraint sync.
    pub async fn find_by_plan(&self, plan_id: Uuid) -> Result<Vec<Space>, AppError> {
        let entities = entity::prelude::Space::find()
            .filter(entity::space::Column::PlanId.eq(plan_id))
            .all(self.db)
            .await?;

        entities.into_iter().map(Space::from_entity).collect()
    }

    /// Spaces whose removal marking is older than the cutoff, due for purge.
    pub async fn find_marked_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Space>, AppError> {
        let entities = entity::prelude::Space::find()
            .filter(entity::space::Column::MarkedForRemovalAt.lte(cutoff))
            .all(self.db)
            .await?;

        entities.into_iter().map(Space::from_entity).collect()
    }

    /// Hard-deletes a space. Only the purge job calls this, and only for
    /// spaces whose removal marking has passed the grace period.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::Space::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
