//! Organization domain model, membership, and removal invariants.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::organization::{OrganizationDto, OrganizationMemberDto},
    error::domain::{BlockingEntity, DomainError},
    model::event::{DomainEvent, RecordedEvents},
};

/// Membership access level inside an organization.
///
/// The owner-access decision only ever distinguishes manager-or-above from
/// below, so two levels cover the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Manager,
    Collaborator,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Collaborator => "collaborator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(Self::Manager),
            "collaborator" => Some(Self::Collaborator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    /// Reserved system/admin organization; deny-only for non-admins and
    /// never removable.
    pub internal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: RecordedEvents,
}

impl Organization {
    pub fn create(id: Uuid, name: impl Into<String>) -> Self {
        Self::new(id, name, false)
    }

    /// Creates a reserved internal organization (e.g. the administrator
    /// organization seeded at install time).
    pub fn create_internal(id: Uuid, name: impl Into<String>) -> Self {
        Self::new(id, name, true)
    }

    fn new(id: Uuid, name: impl Into<String>, internal: bool) -> Self {
        let now = Utc::now();
        let name = name.into();

        let mut organization = Self {
            id,
            name: name.clone(),
            internal,
            created_at: now,
            updated_at: now,
            events: RecordedEvents::default(),
        };
        organization.events.record(DomainEvent::OrganizationCreated {
            organization_id: id,
            name,
        });

        organization
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Checks the removal invariants and records the removal event.
    ///
    /// Internal organizations are never removable, regardless of usage.
    /// Otherwise removal is blocked while any space or domain name still
    /// belongs to the organization; the blocking entities are carried in the
    /// error for display.
    pub fn prepare_removal(&mut self, blocking: Vec<BlockingEntity>) -> Result<(), DomainError> {
        if self.internal {
            return Err(DomainError::CannotRemoveInternalOrganization {
                organization_id: self.id,
            });
        }

        if !blocking.is_empty() {
            return Err(DomainError::CannotRemoveActiveOrganization {
                organization_id: self.id,
                blocking,
            });
        }

        self.events.record(DomainEvent::OrganizationRemoved {
            organization_id: self.id,
        });

        Ok(())
    }

    pub fn into_dto(self) -> OrganizationDto {
        OrganizationDto {
            id: self.id,
            name: self.name,
            internal: self.internal,
        }
    }

    pub fn from_entity(entity: entity::organization::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            internal: entity.internal,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            events: RecordedEvents::default(),
        }
    }
}

/// Membership row of an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationMember {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub level: AccessLevel,
    pub added_at: DateTime<Utc>,
}

impl OrganizationMember {
    pub fn into_dto(self) -> OrganizationMemberDto {
        OrganizationMemberDto {
            user_id: self.user_id,
            level: self.level.as_str().to_string(),
        }
    }

    pub fn from_entity(
        entity: entity::organization_member::Model,
    ) -> Result<Self, crate::error::AppError> {
        let level = AccessLevel::from_str(&entity.level).ok_or_else(|| {
            crate::error::AppError::InternalError(format!(
                "Unknown organization member access level: {}",
                entity.level
            ))
        })?;

        Ok(Self {
            organization_id: entity.organization_id,
            user_id: entity.user_id,
            level,
            added_at: entity.added_at,
        })
    }
}

/// Parameters for creating an organization.
#[derive(Debug, Clone)]
pub struct CreateOrganizationParam {
    pub id: Uuid,
    pub name: String,
    pub internal: bool,
}

/// Parameters for adding a member or changing an existing member's level.
///
/// Adding an already-present user re-adds with the new level; membership is
/// last-write-wins and never duplicated per user.
#[derive(Debug, Clone)]
pub struct AddMemberParam {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub level: AccessLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_organization_is_never_removable() {
        let mut organization = Organization::create_internal(Uuid::new_v4(), "Administrators");
        organization.events.drain();

        let err = organization.prepare_removal(Vec::new()).unwrap_err();

        assert!(matches!(
            err,
            DomainError::CannotRemoveInternalOrganization { organization_id }
                if organization_id == organization.id
        ));
        assert!(organization.events.is_empty());
    }

    #[test]
    fn active_organization_removal_lists_blockers() {
        let mut organization = Organization::create(Uuid::new_v4(), "Rollerworks");
        organization.events.drain();

        let space_id = Uuid::new_v4();
        let domain_id = Uuid::new_v4();
        let err = organization
            .prepare_removal(vec![
                BlockingEntity::new("space", space_id, "rollerworks space"),
                BlockingEntity::new("domain_name", domain_id, "rollerworks.net"),
            ])
            .unwrap_err();

        match err {
            DomainError::CannotRemoveActiveOrganization { blocking, .. } => {
                let kinds: Vec<_> = blocking.iter().map(|b| b.kind.as_str()).collect();
                assert_eq!(kinds, vec!["space", "domain_name"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unused_organization_removal_succeeds() {
        let mut organization = Organization::create(Uuid::new_v4(), "Testing Inc.");
        organization.events.drain();

        organization.prepare_removal(Vec::new()).unwrap();

        assert_eq!(
            organization.events.as_slice(),
            &[DomainEvent::OrganizationRemoved {
                organization_id: organization.id
            }]
        );
    }
}
