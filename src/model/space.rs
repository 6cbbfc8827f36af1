//! Webhosting space (account) domain model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::space::SpaceDto,
    error::{domain::DomainError, AppError},
    model::{
        constraint::Constraints,
        event::{DomainEvent, RecordedEvents},
        owner::Owner,
    },
};

#[derive(Debug, Clone)]
pub struct Space {
    pub id: Uuid,
    pub owner: Owner,
    /// Plan backing the constraint set, absent when constraints were set
    /// individually.
    pub plan_id: Option<Uuid>,
    pub constraints: Constraints,
    pub marked_for_removal_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: RecordedEvents,
}

impl Space {
    /// Registers a space with constraints copied from a plan.
    pub fn register_with_plan(
        id: Uuid,
        owner: Owner,
        plan_id: Uuid,
        plan_constraints: Constraints,
    ) -> Self {
        let mut space = Self::new(id, owner, Some(plan_id), plan_constraints);
        space
            .events
            .record(DomainEvent::SpaceRegistered { space_id: id, owner });
        space
    }

    /// Registers a space with an individually chosen constraint set.
    pub fn register_with_constraints(id: Uuid, owner: Owner, constraints: Constraints) -> Self {
        let mut space = Self::new(id, owner, None, constraints);
        space
            .events
            .record(DomainEvent::SpaceRegistered { space_id: id, owner });
        space
    }

    fn new(id: Uuid, owner: Owner, plan_id: Option<Uuid>, constraints: Constraints) -> Self {
        let now = Utc::now();

        Self {
            id,
            owner,
            plan_id,
            constraints,
            marked_for_removal_at: None,
            created_at: now,
            updated_at: now,
            events: RecordedEvents::default(),
        }
    }

    /// Assigns a plan, replacing the current constraint set with the plan's.
    pub fn assign_plan(&mut self, plan_id: Uuid, plan_constraints: Constraints) {
        self.plan_id = Some(plan_id);
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::SpacePlanAssigned {
            space_id: self.id,
            plan_id,
        });

        if self.constraints != plan_constraints {
            self.constraints = plan_constraints.clone();
            self.events.record(DomainEvent::SpaceConstraintsChanged {
                space_id: self.id,
                constraints: plan_constraints,
            });
        }
    }

    /// Replaces the constraint set individually, detaching the space from
    /// its plan. No event when the set is unchanged.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.plan_id = None;

        if self.constraints == constraints {
            return;
        }

        self.constraints = constraints.clone();
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::SpaceConstraintsChanged {
            space_id: self.id,
            constraints,
        });
    }

    /// Applies an updated constraint set pushed from the linked plan.
    /// No event when the set is unchanged.
    pub fn sync_plan_constraints(&mut self, constraints: Constraints) {
        if self.constraints == constraints {
            return;
        }

        self.constraints = constraints.clone();
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::SpaceConstraintsChanged {
            space_id: self.id,
            constraints,
        });
    }

    pub fn transfer_owner(&mut self, owner: Owner) {
        if self.owner == owner {
            return;
        }

        self.owner = owner;
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::SpaceOwnerTransferred {
            space_id: self.id,
            owner,
        });
    }

    /// Marks the space for removal. Idempotent; actual deletion happens in
    /// the purge job once the grace period has passed.
    pub fn mark_for_removal(&mut self) {
        if self.marked_for_removal_at.is_some() {
            return;
        }

        self.marked_for_removal_at = Some(Utc::now());
        self.updated_at = Utc::now();
        self.events
            .record(DomainEvent::SpaceMarkedForRemoval { space_id: self.id });
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal_at.is_some()
    }

    /// Guards mutations of the space and its child resources.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_marked_for_removal() {
            return Err(DomainError::SpaceMarkedForRemoval { space_id: self.id });
        }

        Ok(())
    }

    pub fn into_dto(self) -> SpaceDto {
        SpaceDto {
            id: self.id,
            owner_user_id: self.owner.user_id(),
            owner_organization_id: self.owner.organization_id(),
            plan_id: self.plan_id,
            constraints: self.constraints,
            marked_for_removal: self.marked_for_removal_at.is_some(),
        }
    }

    pub fn from_entity(entity: entity::space::Model) -> Result<Self, AppError> {
        let owner = Owner::from_columns(entity.owner_user_id, entity.owner_organization_id)?;
        let constraints = Constraints::from_json(&entity.constraints).map_err(|e| {
            AppError::InternalError(format!(
                "Failed to decode constraints of space {}: {}",
                entity.id, e
            ))
        })?;

        Ok(Self {
            id: entity.id,
            owner,
            plan_id: entity.plan_id,
            constraints,
            marked_for_removal_at: entity.marked_for_removal_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            events: RecordedEvents::default(),
        })
    }
}

/// Parameters for registering a space. Exactly one of `plan_id` and
/// `constraints` drives the initial constraint set.
#[derive(Debug, Clone)]
pub struct RegisterSpaceParam {
    pub id: Uuid,
    pub owner: Owner,
    pub plan_id: Option<Uuid>,
    pub constraints: Option<Constraints>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constraint::ConstraintKind;

    fn space() -> Space {
        let mut space = Space::register_with_constraints(
            Uuid::new_v4(),
            Owner::User(Uuid::new_v4()),
            Constraints::default().with(ConstraintKind::MailboxCount, 10),
        );
        space.events.drain();
        space
    }

    #[test]
    fn marking_for_removal_is_idempotent() {
        let mut space = space();

        space.mark_for_removal();
        let first = space.marked_for_removal_at;
        space.mark_for_removal();

        assert!(space.is_marked_for_removal());
        assert_eq!(space.marked_for_removal_at, first);
        assert_eq!(space.events.as_slice().len(), 1);
        assert!(space.ensure_active().is_err());
    }

    #[test]
    fn setting_equal_constraints_records_nothing() {
        let mut space = space();

        space.set_constraints(Constraints::default().with(ConstraintKind::MailboxCount, 10));

        assert!(space.events.is_empty());
        assert_eq!(space.plan_id, None);
    }

    #[test]
    fn assigning_plan_copies_constraints() {
        let mut space = space();
        let plan_id = Uuid::new_v4();
        let plan_constraints = Constraints::default().with(ConstraintKind::MailboxCount, 50);

        space.assign_plan(plan_id, plan_constraints.clone());

        assert_eq!(space.plan_id, Some(plan_id));
        assert_eq!(space.constraints, plan_constraints);
        assert_eq!(space.events.as_slice().len(), 2);
    }

    #[test]
    fn owner_transfer_to_same_owner_records_nothing() {
        let mut space = space();
        let owner = space.owner;

        space.transfer_owner(owner);

        assert!(space.events.is_empty());
    }
}
