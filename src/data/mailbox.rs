//! Mailbox and mail-forward data repositories.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::mailbox::{MailForward, Mailbox},
};

pub struct MailboxRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MailboxRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, mailbox: &Mailbox) -> Result<(), AppError> {
        entity::mailbox::ActiveModel {
            id: ActiveValue::Set(mailbox.id),
            space_id: ActiveValue::Set(mailbox.space_id),
            domain_name_id: ActiveValue::Set(mailbox.domain_name_id),
            address: ActiveValue::Set(mailbox.address.clone()),
            size_quota: ActiveValue::Set(mailbox.size_quota),
            password_hash: ActiveValue::Set(mailbox.password_hash.clone()),
            created_at: ActiveValue::Set(mailbox.created_at),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn update(&self, mailbox: &Mailbox) -> Result<(), AppError> {
        entity::mailbox::ActiveModel {
            id: ActiveValue::Unchanged(mailbox.id),
            space_id: ActiveValue::Set(mailbox.space_id),
            domain_name_id: ActiveValue::Set(mailbox.domain_name_id),
            address: ActiveValue::Set(mailbox.address.clone()),
            size_quota: ActiveValue::Set(mailbox.size_quota),
            password_hash: ActiveValue::Set(mailbox.password_hash.clone()),
            created_at: ActiveValue::Unchanged(mailbox.created_at),
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Mailbox>, AppError> {
        let entity = entity::prelude::Mailbox::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Mailbox::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<Mailbox>, AppError> {
        let entities = entity::prelude::Mailbox::find()
            .filter(entity::mailbox::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::mailbox::Column::Address)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Mailbox::from_entity).collect())
    }

    /// Mailboxes of a space still bound to the given domain name; feeds the
    /// domain-name usage validator.
    pub async fn find_by_space_and_domain(
        &self,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<Mailbox>, AppError> {
        let entities = entity::prelude::Mailbox::find()
            .filter(entity::mailbox::Column::SpaceId.eq(space_id))
            .filter(entity::mailbox::Column::DomainNameId.eq(domain_name_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Mailbox::from_entity).collect())
    }

    pub async fn address_exists(
        &self,
        domain_name_id: Uuid,
        address: &str,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::Mailbox::find()
            .filter(entity::mailbox::Column::DomainNameId.eq(domain_name_id))
            .filter(entity::mailbox::Column::Address.eq(address))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Current mailbox count of a space; usage read of the capability guard.
    pub async fn count_by_space(&self, space_id: Uuid) -> Result<u64, AppError> {
        let count = entity::prelude::Mailbox::find()
            .filter(entity::mailbox::Column::SpaceId.eq(space_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Sum of all mailbox size quotas of a space, in bytes; usage read of
    /// the storage-quota guard.
    pub async fn total_size_quota_by_space(&self, space_id: Uuid) -> Result<i64, AppError> {
        let total: Option<i64> = entity::prelude::Mailbox::find()
            .select_only()
            .column_as(entity::mailbox::Column::SizeQuota.sum(), "total")
            .filter(entity::mailbox::Column::SpaceId.eq(space_id))
            .into_tuple()
            .one(self.db)
            .await?
            .flatten();

        Ok(total.unwrap_or(0))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::Mailbox::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}

pub struct MailForwardRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MailForwardRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, forward: &MailForward) -> Result<(), AppError> {
        entity::mail_forward::ActiveModel {
            id: ActiveValue::Set(forward.id),
            space_id: ActiveValue::Set(forward.space_id),
            domain_name_id: ActiveValue::Set(forward.domain_name_id),
            address: ActiveValue::Set(forward.address.clone()),
            destination: ActiveValue::Set(forward.destination.clone()),
            created_at: ActiveValue::Set(forward.created_at),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MailForward>, AppError> {
        let entity = entity::prelude::MailForward::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(MailForward::from_entity))
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> Result<Vec<MailForward>, AppError> {
        let entities = entity::prelude::MailForward::find()
            .filter(entity::mail_forward::Column::SpaceId.eq(space_id))
            .order_by_asc(entity::mail_forward::Column::Address)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(MailForward::from_entity).collect())
    }

    pub async fn find_by_space_and_domain(
        &self,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<MailForward>, AppError> {
        let entities = entity::prelude::MailForward::find()
            .filter(entity::mail_forward::Column::SpaceId.eq(space_id))
            .filter(entity::mail_forward::Column::DomainNameId.eq(domain_name_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(MailForward::from_entity).collect())
    }

    pub async fn address_exists(
        &self,
        domain_name_id: Uuid,
        address: &str,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::MailForward::find()
            .filter(entity::mail_forward::Column::DomainNameId.eq(domain_name_id))
            .filter(entity::mail_forward::Column::Address.eq(address))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count_by_space(&self, space_id: Uuid) -> Result<u64, AppError> {
        let count = entity::prelude::MailForward::find()
            .filter(entity::mail_forward::Column::SpaceId.eq(space_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::MailForward::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
