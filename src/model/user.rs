//! User domain model and operation parameters.
//!
//! Users authenticate with email and password; administrators additionally
//! pass every ownership check. The email blind index used for lookups is an
//! infrastructure concern and never appears on the domain model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::user::{PaginatedUsersDto, UserDto},
    model::event::{DomainEvent, RecordedEvents},
};

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    /// Argon2 hash of the login password.
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: RecordedEvents,
}

impl User {
    /// Registers a new user with the given identity.
    ///
    /// The caller provides the already-hashed password; email uniqueness is
    /// enforced at the repository boundary through the blind index.
    pub fn register(
        id: Uuid,
        display_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        admin: bool,
    ) -> Self {
        let now = Utc::now();
        let email = email.into();

        let mut user = Self {
            id,
            display_name: display_name.into(),
            email: email.clone(),
            password_hash: password_hash.into(),
            admin,
            created_at: now,
            updated_at: now,
            events: RecordedEvents::default(),
        };
        user.events.record(DomainEvent::UserRegistered {
            user_id: id,
            email,
        });

        user
    }

    /// Replaces the password hash after a reset or an explicit change.
    pub fn change_password(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
        self.events
            .record(DomainEvent::UserPasswordChanged { user_id: self.id });
    }

    /// Applies a confirmed email-address change.
    pub fn change_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.email = email.clone();
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::UserEmailAddressChanged {
            user_id: self.id,
            email,
        });
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            display_name: self.display_name,
            email: self.email,
            admin: self.admin,
        }
    }

    /// Converts an entity model to a user domain model at the repository
    /// boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            display_name: entity.display_name,
            email: entity.email,
            password_hash: entity.password_hash,
            admin: entity.admin,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            events: RecordedEvents::default(),
        }
    }
}

/// Parameters for registering a user or administrator.
///
/// The id is chosen by the caller so that the API and CLI can report it
/// without a read-back.
#[derive(Debug, Clone)]
pub struct RegisterUserParam {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    /// Plain-text password; hashed by the service before it reaches the
    /// repository.
    pub password: String,
    pub admin: bool,
}

/// Parameters for paginated user queries.
#[derive(Debug, Clone)]
pub struct GetAllUsersParam {
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(|u| u.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for granting or revoking admin privileges.
#[derive(Debug, Clone)]
pub struct SetAdminParam {
    pub user_id: Uuid,
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_records_event_with_email() {
        let id = Uuid::new_v4();
        let user = User::register(id, "Jane", "jane@example.com", "$argon2$x", false);

        assert_eq!(
            user.events.as_slice(),
            &[DomainEvent::UserRegistered {
                user_id: id,
                email: "jane@example.com".to_string(),
            }]
        );
    }

    #[test]
    fn changing_email_updates_and_records() {
        let mut user = User::register(Uuid::new_v4(), "Jane", "jane@example.com", "h", false);
        user.events.drain();

        user.change_email("jane@rollerworks.example");

        assert_eq!(user.email, "jane@rollerworks.example");
        assert_eq!(user.events.as_slice().len(), 1);
    }
}
