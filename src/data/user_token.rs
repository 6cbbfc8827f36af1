//! Single-use token repository backing password resets and email changes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::error::AppError;

/// Token kinds. Stored as plain strings on the `kind` column.
pub const KIND_PASSWORD_RESET: &str = "password_reset";
pub const KIND_EMAIL_CHANGE: &str = "email_change";

pub struct UserTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Parameters for storing a freshly generated token.
pub struct StoreTokenParam {
    pub user_id: Uuid,
    pub kind: &'static str,
    pub selector: String,
    pub verifier_hash: String,
    pub payload: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl<'a> UserTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a token, invalidating any earlier token of the same kind for
    /// the user so only the most recent mail remains usable.
    pub async fn store(&self, param: StoreTokenParam) -> Result<(), AppError> {
        self.delete_for_user(param.user_id, param.kind).await?;

        entity::user_token::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.to_string()),
            selector: ActiveValue::Set(param.selector),
            verifier_hash: ActiveValue::Set(param.verifier_hash),
            payload: ActiveValue::Set(param.payload),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Finds a not-yet-expired token by selector and kind.
    pub async fn find_valid_by_selector(
        &self,
        selector: &str,
        kind: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<entity::user_token::Model>, AppError> {
        let token = entity::prelude::UserToken::find()
            .filter(entity::user_token::Column::Selector.eq(selector))
            .filter(entity::user_token::Column::Kind.eq(kind))
            .filter(entity::user_token::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        Ok(token)
    }

    /// Deletes a consumed token.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        entity::prelude::UserToken::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn delete_for_user(&self, user_id: Uuid, kind: &str) -> Result<(), AppError> {
        entity::prelude::UserToken::delete_many()
            .filter(entity::user_token::Column::UserId.eq(user_id))
            .filter(entity::user_token::Column::Kind.eq(kind))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Removes all expired tokens. Called by the maintenance scheduler.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::UserToken::delete_many()
            .filter(entity::user_token::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
