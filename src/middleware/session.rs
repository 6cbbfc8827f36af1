//! Type-safe session wrapper.
//!
//! Wraps the tower-sessions `Session` behind an interface that only exposes
//! the authentication state, keeping session key strings in one place.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

const SESSION_AUTH_USER_ID: &str = "auth:user";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated user's id after a successful login.
    pub async fn set_user_id(&self, user_id: Uuid) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the authenticated user's id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session (not logged in)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user_id(&self) -> Result<Option<Uuid>, AppError> {
        let user_id = self.session.get::<Uuid>(SESSION_AUTH_USER_ID).await?;
        Ok(user_id)
    }

    /// Clears all session data during logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}
