//! User service: registration, login, password reset, email change.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    data::{
        user::UserRepository,
        user_token::{StoreTokenParam, UserTokenRepository, KIND_EMAIL_CHANGE, KIND_PASSWORD_RESET},
    },
    error::{auth::AuthError, domain::DomainError, AppError},
    mailer::MailMessage,
    model::user::{GetAllUsersParam, PaginatedUsers, RegisterUserParam, SetAdminParam, User},
    state::AppState,
    util::{password, token},
};

/// Lifetime of password-reset and email-change tokens.
const TOKEN_TTL_HOURS: i64 = 1;

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.state.db, self.state.hash_strategy.as_ref())
    }

    fn tokens(&self) -> UserTokenRepository<'_> {
        UserTokenRepository::new(&self.state.db)
    }

    /// Registers a user or administrator.
    ///
    /// # Returns
    /// - `Ok(User)` - Persisted user with the given id
    /// - `Err(DomainError::EmailAddressAlreadyInUse)` - Another user already
    ///   registered with this email; carries the existing user's id
    pub async fn register(&self, param: RegisterUserParam) -> Result<User, AppError> {
        let users = self.users();

        if let Some(existing) = users.find_by_email(&param.email).await? {
            return Err(DomainError::EmailAddressAlreadyInUse {
                email: param.email,
                user_id: existing.id,
            }
            .into());
        }

        let password_hash = password::hash_password(&param.password)?;
        let mut user = User::register(
            param.id,
            param.display_name,
            param.email,
            password_hash,
            param.admin,
        );

        let events = users.insert(&mut user).await?;
        self.state.events.dispatch_all(events).await;

        Ok(user)
    }

    /// Verifies email/password credentials for login.
    ///
    /// The error never reveals whether the email or the password was wrong.
    pub async fn login(&self, email: &str, password_input: &str) -> Result<User, AppError> {
        let Some(user) = self.users().find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password_input, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        self.users().find_by_id(user_id).await
    }

    pub async fn get_all_users(&self, param: GetAllUsersParam) -> Result<PaginatedUsers, AppError> {
        let (users, total) = self
            .users()
            .get_all_paginated(param.page, param.per_page)
            .await?;

        let total_pages = (total as f64 / param.per_page as f64).ceil() as u64;

        Ok(PaginatedUsers {
            users,
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages,
        })
    }

    /// Grants or revokes admin privileges.
    pub async fn set_admin(&self, param: SetAdminParam) -> Result<(), AppError> {
        let users = self.users();

        if users.find_by_id(param.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        users.set_admin(param.user_id, param.admin).await?;

        Ok(())
    }

    /// Starts a password reset.
    ///
    /// Always succeeds from the caller's perspective: an unknown email sends
    /// nothing but reports no error, so the endpoint cannot be used to probe
    /// for registered addresses.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.users().find_by_email(email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let generated = token::generate();
        self.tokens()
            .store(StoreTokenParam {
                user_id: user.id,
                kind: KIND_PASSWORD_RESET,
                selector: generated.selector,
                verifier_hash: generated.verifier_hash,
                payload: None,
                expires_at: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
            })
            .await?;

        self.state
            .mailer
            .send(MailMessage::password_reset(
                user.email,
                &self.state.app_url,
                &generated.token,
            ))
            .await?;

        Ok(())
    }

    /// Completes a password reset with the mailed token.
    pub async fn confirm_password_reset(
        &self,
        raw_token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let stored = self.consume_token(raw_token, KIND_PASSWORD_RESET).await?;

        let users = self.users();
        let Some(mut user) = users.find_by_id(stored.user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        user.change_password(password::hash_password(new_password)?);
        let events = users.update(&mut user).await?;
        self.state.events.dispatch_all(events).await;

        Ok(())
    }

    /// Starts an email-address change; the confirmation token goes to the
    /// new address.
    pub async fn request_email_change(
        &self,
        user_id: Uuid,
        new_email: &str,
    ) -> Result<(), AppError> {
        let users = self.users();

        let Some(user) = users.find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        if let Some(existing) = users.find_by_email(new_email).await? {
            return Err(DomainError::EmailAddressAlreadyInUse {
                email: new_email.to_string(),
                user_id: existing.id,
            }
            .into());
        }

        let generated = token::generate();
        self.tokens()
            .store(StoreTokenParam {
                user_id: user.id,
                kind: KIND_EMAIL_CHANGE,
                selector: generated.selector,
                verifier_hash: generated.verifier_hash,
                payload: Some(new_email.to_string()),
                expires_at: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
            })
            .await?;

        self.state
            .mailer
            .send(MailMessage::email_change_confirmation(
                new_email,
                &self.state.app_url,
                &generated.token,
            ))
            .await?;

        Ok(())
    }

    /// Applies a confirmed email-address change.
    pub async fn confirm_email_change(&self, raw_token: &str) -> Result<User, AppError> {
        let stored = self.consume_token(raw_token, KIND_EMAIL_CHANGE).await?;

        let new_email = stored.payload.ok_or_else(|| {
            AppError::InternalError("Email change token has no payload".to_string())
        })?;

        let users = self.users();
        let Some(mut user) = users.find_by_id(stored.user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        user.change_email(new_email);
        let events = users.update(&mut user).await?;
        self.state.events.dispatch_all(events).await;

        Ok(user)
    }

    /// Validates and deletes a single-use token, returning its row.
    async fn consume_token(
        &self,
        raw_token: &str,
        kind: &'static str,
    ) -> Result<entity::user_token::Model, AppError> {
        let Some((selector, verifier)) = token::split(raw_token) else {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        };

        let tokens = self.tokens();
        let Some(stored) = tokens
            .find_valid_by_selector(selector, kind, Utc::now())
            .await?
        else {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        };

        if !token::verifier_matches(verifier, &stored.verifier_hash) {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        }

        tokens.delete(stored.id).await?;

        Ok(stored)
    }
}
