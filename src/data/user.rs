//! User data repository.
//!
//! Handles user persistence with the blind-index email hash computed at this
//! boundary: the hash strategy is injected so lookups by email never touch
//! the plain column.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    model::{event::DomainEvent, user::User},
    util::hash::EmailHashStrategy,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
    hash_strategy: &'a dyn EmailHashStrategy,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection, hash_strategy: &'a dyn EmailHashStrategy) -> Self {
        Self { db, hash_strategy }
    }

    /// Persists a newly registered user and drains its recorded events.
    ///
    /// # Returns
    /// - `Ok(Vec<DomainEvent>)` - Events recorded by the aggregate, for the
    ///   caller to dispatch
    /// - `Err(AppError::DbErr)` - Insert failed (including a violated email
    ///   blind-index uniqueness constraint)
    pub async fn insert(&self, user: &mut User) -> Result<Vec<DomainEvent>, AppError> {
        entity::user::ActiveModel {
            id: ActiveValue::Set(user.id),
            display_name: ActiveValue::Set(user.display_name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            email_hash: ActiveValue::Set(self.hash_strategy.hash(&user.email)),
            password_hash: ActiveValue::Set(user.password_hash.clone()),
            admin: ActiveValue::Set(user.admin),
            created_at: ActiveValue::Set(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        }
        .insert(self.db)
        .await?;

        Ok(user.events.drain())
    }

    /// Persists changes to an existing user and drains its recorded events.
    ///
    /// The email blind index is recomputed so a confirmed address change
    /// keeps lookups consistent.
    pub async fn update(&self, user: &mut User) -> Result<Vec<DomainEvent>, AppError> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            display_name: ActiveValue::Set(user.display_name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            email_hash: ActiveValue::Set(self.hash_strategy.hash(&user.email)),
            password_hash: ActiveValue::Set(user.password_hash.clone()),
            admin: ActiveValue::Set(user.admin),
            created_at: ActiveValue::Unchanged(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        }
        .update(self.db)
        .await?;

        Ok(user.events.drain())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email address through the blind index.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::EmailHash.eq(self.hash_strategy.hash(email)))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets all users with pagination, ordered by display name.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and the total
    ///   user count across all pages
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), AppError> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::DisplayName)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, total))
    }

    /// Checks if any admin users exist. Used during startup and by the CLI
    /// to detect a first-time setup.
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Sets admin status for a user.
    pub async fn set_admin(&self, user_id: Uuid, admin: bool) -> Result<(), AppError> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(
                entity::user::Column::Admin,
                sea_orm::sea_query::Expr::value(admin),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }
}
