//! FTP user data repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{error::AppError, model::ftp_user::FtpUser};

pub struct FtpUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FtpUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, ftp_user: &FtpUser) -> Result<(), AppError> {
        entity::ftp_user::ActiveModel {
            id: ActiveValue::Set(ftp_user.id),
            space_id: ActiveValue::Set(ftp_user.space_id),
            domain_name_id: ActiveValue::Set(ftp_user.domain_name_id),
            username: ActiveValue::Set(ftp_user.username.clone()),
            password_hash: ActiveValue::Set(ftp_user.password_hash.clone()),
            created_at: ActiveValue::Set(ftp_user.created_at),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FtpUser>, AppError> {
        let entity = entity::prelude::FtpUser::find_by_id(id).one(self.db).await?;

        Ok(entity.map(FtpUser::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<FtpUser>, AppError> {
        let entities = entity::prelude::FtpUser::find()
            .filter(entity::ftp_user::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::ftp_user::Column::Username)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(FtpUser::from_entity).collect())
    }

    /// FTP users of a space still bound to the given domain name; feeds the
    /// domain-name usage validator.
    pub async fn find_by_space_and_domain(
        &self,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<FtpUser>, AppError> {
        let entities = entity::prelude::FtpUser::find()
            .filter(entity::ftp_user::Column::SpaceId.eq(space_id))
            .filter(entity::ftp_user::Column::DomainNameId.eq(domain_name_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(FtpUser::from_entity).collect())
    }

    pub async fn username_exists(
        &self,
        domain_name_id: Uuid,
        username: &str,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::FtpUser::find()
            .filter(entity::ftp_user::Column::DomainNameId.eq(domain_name_id))
            .filter(entity::ftp_user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Current FTP user count of a space; the usage read of the capability
    /// guard.
    pub async fn count_by_space(&self, space_id: Uuid) -> Result<u64, AppError> {
        let count = entity::prelude::FtpUser::find()
            .filter(entity::ftp_user::Column::SpaceId.eq(space_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::FtpUser::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
