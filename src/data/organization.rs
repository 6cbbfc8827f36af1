//! Organization data repository.
//!
//! Membership is last-write-wins: adding a user who is already a member
//! updates the access level in place through an upsert on the composite
//! primary key, so a user can never appear twice.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::{
        event::DomainEvent,
        organization::{AddMemberParam, Organization, OrganizationMember},
    },
};

pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a newly created organization and drains its recorded events.
    pub async fn insert(
        &self,
        organization: &mut Organization,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::organization::ActiveModel {
            id: ActiveValue::Set(organization.id),
            name: ActiveValue::Set(organization.name.clone()),
            internal: ActiveValue::Set(organization.internal),
            created_at: ActiveValue::Set(organization.created_at),
            updated_at: ActiveValue::Set(organization.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(organization.events.drain())
    }

    pub async fn update(
        &self,
        organization: &mut Organization,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::organization::ActiveModel {
            id: ActiveValue::Unchanged(organization.id),
            name: ActiveValue::Set(organization.name.clone()),
            internal: ActiveValue::Set(organization.internal),
            created_at: ActiveValue::Unchanged(organization.created_at),
            updated_at: ActiveValue::Set(organization.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(organization.events.drain())
    }

    /// Deletes the organization row after the aggregate's removal invariants
    /// passed, draining the recorded removal event.
    pub async fn remove(
        &self,
        organization: &mut Organization,
    ) -> Result<Vec<DomainEvent>, AppError> {
        entity::prelude::Organization::delete_by_id(organization.id)
            .exec(self.db)
            .await?;

        Ok(organization.events.drain())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let entity = entity::prelude::Organization::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Organization::from_entity))
    }

    /// The reserved internal (administrator) organization, if seeded.
    pub async fn find_internal(&self) -> Result<Option<Organization>, AppError> {
        let entity = entity::prelude::Organization::find()
            .filter(entity::organization::Column::Internal.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Organization::from_entity))
    }

    /// Gets all organizations with pagination, ordered by name.
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Organization>, u64), AppError> {
        let paginator = entity::prelude::Organization::find()
            .order_by_asc(entity::organization::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let organizations = entities.into_iter().map(Organization::from_entity).collect();

        Ok((organizations, total))
    }

    /// Adds a member or updates an existing member's access level.
    ///
    /// Upserts on the (organization, user) composite key so the same user is
    /// never duplicated; re-adding replaces the level (last-write-wins).
    pub async fn upsert_member(
        &self,
        param: AddMemberParam,
    ) -> Result<OrganizationMember, AppError> {
        let entity = entity::prelude::OrganizationMember::insert(
            entity::organization_member::ActiveModel {
                organization_id: ActiveValue::Set(param.organization_id),
                user_id: ActiveValue::Set(param.user_id),
                level: ActiveValue::Set(param.level.as_str().to_string()),
                added_at: ActiveValue::Set(Utc::now()),
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::organization_member::Column::OrganizationId,
                entity::organization_member::Column::UserId,
            ])
            .update_column(entity::organization_member::Column::Level)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        OrganizationMember::from_entity(entity)
    }

    /// Removes a member. Returns false when the user was not a member.
    pub async fn remove_member(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = entity::prelude::OrganizationMember::delete_many()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .filter(entity::organization_member::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_members(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<OrganizationMember>, AppError> {
        let entities = entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .order_by_asc(entity::organization_member::Column::AddedAt)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(OrganizationMember::from_entity)
            .collect()
    }

    pub async fn find_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrganizationMember>, AppError> {
        let entity = entity::prelude::OrganizationMember::find_by_id((organization_id, user_id))
            .one(self.db)
            .await?;

        entity.map(OrganizationMember::from_entity).transpose()
    }
}
