//! Session authentication guard and owner-level access decisions.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    data::{organization::OrganizationRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{
        organization::{AccessLevel, Organization, OrganizationMember},
        owner::Owner,
        user::User,
    },
    util::hash::EmailHashStrategy,
};

/// Permission required by a controller action.
pub enum Permission {
    /// Caller must be an administrator.
    Admin,
    /// Caller must be allowed to act on an entity with the given owner:
    /// administrators always pass, user-owned entities require identity,
    /// organization-owned entities require manager-level membership.
    OwnerAccess(Owner),
}

/// Outcome of the owner access decision.
///
/// `Abstain` defers to the caller's default policy; when no rule grants
/// access the guard denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
    Abstain,
}

/// Decides whether `actor` may act on an entity owned by `owner`.
///
/// - Administrators always pass.
/// - User-owned: the actor must be the owner; any other user is denied.
/// - Organization-owned: the reserved internal organization is deny-only for
///   non-admins; membership at `Manager` level grants access; anything else
///   abstains.
pub fn decide_owner_access(
    actor: &User,
    owner: &Owner,
    organization: Option<&Organization>,
    membership: Option<&OrganizationMember>,
) -> AccessDecision {
    if actor.admin {
        return AccessDecision::Granted;
    }

    match owner {
        Owner::User(owner_id) => {
            if *owner_id == actor.id {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied
            }
        }
        Owner::Organization(_) => {
            if organization.map(|o| o.internal).unwrap_or(false) {
                return AccessDecision::Denied;
            }

            match membership {
                Some(member) if member.level == AccessLevel::Manager => AccessDecision::Granted,
                _ => AccessDecision::Abstain,
            }
        }
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    hash_strategy: &'a dyn EmailHashStrategy,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        hash_strategy: &'a dyn EmailHashStrategy,
        session: &'a Session,
    ) -> Self {
        Self {
            db,
            hash_strategy,
            session,
        }
    }

    /// Resolves the session user and checks the required permissions.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user satisfying every permission
    /// - `Err(AppError::AuthErr(_))` - Not logged in, unknown session user,
    ///   or a permission check failed
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db, self.hash_strategy);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.admin {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "admin permission required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::OwnerAccess(owner) => {
                    self.check_owner_access(&user, owner).await?;
                }
            }
        }

        Ok(user)
    }

    async fn check_owner_access(&self, user: &User, owner: &Owner) -> Result<(), AppError> {
        let organization_repo = OrganizationRepository::new(self.db);

        let (organization, membership) = match owner {
            Owner::Organization(organization_id) => {
                let organization = organization_repo.find_by_id(*organization_id).await?;
                let membership = organization_repo
                    .find_membership(*organization_id, user.id)
                    .await?;
                (organization, membership)
            }
            Owner::User(_) => (None, None),
        };

        match decide_owner_access(user, owner, organization.as_ref(), membership.as_ref()) {
            AccessDecision::Granted => Ok(()),
            // No voter granted access: the default policy denies.
            AccessDecision::Denied | AccessDecision::Abstain => Err(AuthError::AccessDenied(
                user.id,
                "not allowed to act on this owner".to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(admin: bool) -> User {
        let mut user = User::register(Uuid::new_v4(), "Actor", "actor@example.com", "h", admin);
        user.events.drain();
        user
    }

    fn organization(internal: bool) -> Organization {
        let mut organization = if internal {
            Organization::create_internal(Uuid::new_v4(), "Administrators")
        } else {
            Organization::create(Uuid::new_v4(), "Rollerworks")
        };
        organization.events.drain();
        organization
    }

    fn membership(organization_id: Uuid, user_id: Uuid, level: AccessLevel) -> OrganizationMember {
        OrganizationMember {
            organization_id,
            user_id,
            level,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn admin_always_passes() {
        let actor = user(true);
        let owner = Owner::User(Uuid::new_v4());

        assert_eq!(
            decide_owner_access(&actor, &owner, None, None),
            AccessDecision::Granted
        );

        let internal = organization(true);
        assert_eq!(
            decide_owner_access(&actor, &Owner::Organization(internal.id), Some(&internal), None),
            AccessDecision::Granted
        );
    }

    #[test]
    fn user_owned_requires_identity() {
        let actor = user(false);

        assert_eq!(
            decide_owner_access(&actor, &Owner::User(actor.id), None, None),
            AccessDecision::Granted
        );
        assert_eq!(
            decide_owner_access(&actor, &Owner::User(Uuid::new_v4()), None, None),
            AccessDecision::Denied
        );
    }

    #[test]
    fn manager_membership_grants_organization_access() {
        let actor = user(false);
        let org = organization(false);
        let manager = membership(org.id, actor.id, AccessLevel::Manager);

        assert_eq!(
            decide_owner_access(
                &actor,
                &Owner::Organization(org.id),
                Some(&org),
                Some(&manager)
            ),
            AccessDecision::Granted
        );
    }

    #[test]
    fn collaborator_membership_abstains() {
        let actor = user(false);
        let org = organization(false);
        let collaborator = membership(org.id, actor.id, AccessLevel::Collaborator);

        assert_eq!(
            decide_owner_access(
                &actor,
                &Owner::Organization(org.id),
                Some(&org),
                Some(&collaborator)
            ),
            AccessDecision::Abstain
        );
        assert_eq!(
            decide_owner_access(&actor, &Owner::Organization(org.id), Some(&org), None),
            AccessDecision::Abstain
        );
    }

    #[test]
    fn internal_organization_denies_even_managers() {
        let actor = user(false);
        let org = organization(true);
        let manager = membership(org.id, actor.id, AccessLevel::Manager);

        assert_eq!(
            decide_owner_access(
                &actor,
                &Owner::Organization(org.id),
                Some(&org),
                Some(&manager)
            ),
            AccessDecision::Denied
        );
    }
}
