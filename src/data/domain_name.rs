//! Domain-name data repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::{domain_name::DomainName, event::DomainEvent},
};

pub struct DomainNameRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DomainNameRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        domain_name: &mut DomainName,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::domain_name::ActiveModel {
            id: ActiveValue::Set(domain_name.id),
            name: ActiveValue::Set(domain_name.name.clone()),
            tld: ActiveValue::Set(domain_name.tld.clone()),
            space_id: ActiveValue::Set(domain_name.space_id),
            is_primary: ActiveValue::Set(domain_name.is_primary),
            created_at: ActiveValue::Set(domain_name.created_at),
            updated_at: ActiveValue::Set(domain_name.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(domain_name.events.drain())
    }

    pub async fn update(
        &self,
        domain_name: &mut DomainName,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::domain_name::ActiveModel {
            id: ActiveValue::Unchanged(domain_name.id),
            name: ActiveValue::Set(domain_name.name.clone()),
            tld: ActiveValue::Set(domain_name.tld.clone()),
            space_id: ActiveValue::Set(domain_name.space_id),
            is_primary: ActiveValue::Set(domain_name.is_primary),
            created_at: ActiveValue::Unchanged(domain_name.created_at),
            updated_at: ActiveValue::Set(domain_name.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(domain_name.events.drain())
    }

    /// Deletes the row after the aggregate's removal invariants passed,
    /// draining the recorded removal event.
    pub async fn remove(
        &self,
        domain_name: &mut DomainName,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::prelude::DomainName::delete_by_id(domain_name.id)
            .exec(self.db)
            .await?;

        Ok(domain_name.events.drain())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DomainName>, AppError> {
        let entity = entity::prelude::DomainName::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(DomainName::from_entity))
    }

    pub async fn find_by_name_and_tld(
        &self,
        name: &str,
        tld: &str,
    ) -> Result<Option<DomainName>, AppError> {
        let entity = entity::prelude::DomainName::find()
            .filter(entity::domain_name::Column::Name.eq(name))
            .filter(entity::domain_name::Column::Tld.eq(tld))
            .one(self.db)
            .await?;

        Ok(entity.map(DomainName::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<DomainName>, AppError> {
        let entities = entity::prelude::DomainName::find()
            .filter(entity::domain_name::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::domain_name::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(DomainName::from_entity).collect())
    }

    /// Domain names assigned to any of the given spaces, used by the
    /// organization removal blocking check.
    pub async fn find_by_spaces(&self, space_ids: &[Uuid]) -> Result<Vec<DomainName>, AppError> {
        if space_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::DomainName::find()
            .filter(entity::domain_name::Column::SpaceId.is_in(space_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(DomainName::from_entity).collect())
    }

    /// The current primary domain name of a space, if any.
    pub async fn find_primary_of_space(
        &self,
        space_id: Uuid,
    ) -> Result<Option<DomainName>, AppError> {
        let entity = entity::prelude::DomainName::find()
            .filter(entity::domain_name::Column::SpaceId.eq(space_id))
            .filter(entity::domain_name::Column::IsPrimary.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(DomainName::from_entity))
    }

    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<DomainName>, u64), AppError> {
        let paginator = entity::prelude::DomainName::find()
            .order_by_asc(entity::domain_name::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let domain_names = entities.into_iter().map(DomainName::from_entity).collect();

        Ok((domain_names, total))
    }
}
