//! Sub-domain data repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{error::AppError, model::sub_domain::SubDomain};

pub struct SubDomainRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubDomainRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, sub_domain: &SubDomain) -> Result<(), AppError> {
        entity::sub_domain::ActiveModel {
            id: ActiveValue::Set(sub_domain.id),
            space_id: ActiveValue::Set(sub_domain.space_id),
            domain_name_id: ActiveValue::Set(sub_domain.domain_name_id),
            host: ActiveValue::Set(sub_domain.host.clone()),
            document_root: ActiveValue::Set(sub_domain.document_root.clone()),
            created_at: ActiveValue::Set(sub_domain.created_at),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SubDomain>, AppError> {
        let entity = entity::prelude::SubDomain::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(SubDomain::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<SubDomain>, AppError> {
        let entities = entity::prelude::SubDomain::find()
            .filter(entity::sub_domain::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::sub_domain::Column::Host)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(SubDomain::from_entity).collect())
    }

    pub async fn find_by_space_and_domain(
        &self,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<SubDomain>, AppError> {
        let entities = entity::prelude::SubDomain::find()
            .filter(entity::sub_domain::Column::SpaceId.eq(space_id))
            .filter(entity::sub_domain::Column::DomainNameId.eq(domain_name_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(SubDomain::from_entity).collect())
    }

    pub async fn host_exists(&self, domain_name_id: Uuid, host: &str) -> Result<bool, AppError> {
        let count = entity::prelude::SubDomain::find()
            .filter(entity::sub_domain::Column::DomainNameId.eq(domain_name_id))
            .filter(entity::sub_domain::Column::Host.eq(host))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count_by_space(&self, space_id: Uuid) -> Result<u64, AppError> {
        let count = entity::prelude::SubDomain::find()
            .filter(entity::sub_domain::Column::SpaceId.eq(space_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::SubDomain::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
