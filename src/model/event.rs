//! Domain events recorded by aggregates.
//!
//! Aggregates record events through a `RecordedEvents` recorder; repositories
//! drain the recorder when saving and the service layer dispatches the drained
//! events synchronously on the in-process event bus. Events are side-effect
//! notifications only, never a persisted log.

use uuid::Uuid;

use crate::model::{constraint::Constraints, owner::Owner};

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    UserRegistered {
        user_id: Uuid,
        email: String,
    },
    UserPasswordChanged {
        user_id: Uuid,
    },
    UserEmailAddressChanged {
        user_id: Uuid,
        email: String,
    },
    OrganizationCreated {
        organization_id: Uuid,
        name: String,
    },
    OrganizationMemberAdded {
        organization_id: Uuid,
        user_id: Uuid,
        level: String,
    },
    OrganizationMemberRemoved {
        organization_id: Uuid,
        user_id: Uuid,
    },
    OrganizationRemoved {
        organization_id: Uuid,
    },
    PlanConstraintsChanged {
        plan_id: Uuid,
        constraints: Constraints,
    },
    SpaceRegistered {
        space_id: Uuid,
        owner: Owner,
    },
    SpacePlanAssigned {
        space_id: Uuid,
        plan_id: Uuid,
    },
    SpaceConstraintsChanged {
        space_id: Uuid,
        constraints: Constraints,
    },
    SpaceOwnerTransferred {
        space_id: Uuid,
        owner: Owner,
    },
    SpaceMarkedForRemoval {
        space_id: Uuid,
    },
    DomainNameRegistered {
        domain_name_id: Uuid,
        fqdn: String,
    },
    DomainNameAssigned {
        domain_name_id: Uuid,
        space_id: Uuid,
    },
    DomainNamePrimaryChanged {
        space_id: Uuid,
        domain_name_id: Uuid,
    },
    DomainNameTransferred {
        domain_name_id: Uuid,
        from_space_id: Uuid,
        to_space_id: Uuid,
    },
    DomainNameRemoved {
        domain_name_id: Uuid,
    },
    ScheduledTaskRan {
        task_id: Uuid,
        space_id: Uuid,
        command: String,
    },
}

impl DomainEvent {
    /// Short event name used by the audit listener.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::UserPasswordChanged { .. } => "user.password_changed",
            Self::UserEmailAddressChanged { .. } => "user.email_address_changed",
            Self::OrganizationCreated { .. } => "organization.created",
            Self::OrganizationMemberAdded { .. } => "organization.member_added",
            Self::OrganizationMemberRemoved { .. } => "organization.member_removed",
            Self::OrganizationRemoved { .. } => "organization.removed",
            Self::PlanConstraintsChanged { .. } => "plan.constraints_changed",
            Self::SpaceRegistered { .. } => "space.registered",
            Self::SpacePlanAssigned { .. } => "space.plan_assigned",
            Self::SpaceConstraintsChanged { .. } => "space.constraints_changed",
            Self::SpaceOwnerTransferred { .. } => "space.owner_transferred",
            Self::SpaceMarkedForRemoval { .. } => "space.marked_for_removal",
            Self::DomainNameRegistered { .. } => "domain_name.registered",
            Self::DomainNameAssigned { .. } => "domain_name.assigned",
            Self::DomainNamePrimaryChanged { .. } => "domain_name.primary_changed",
            Self::DomainNameTransferred { .. } => "domain_name.transferred",
            Self::DomainNameRemoved { .. } => "domain_name.removed",
            Self::ScheduledTaskRan { .. } => "scheduled_task.ran",
        }
    }
}

/// Event recorder embedded in aggregates.
///
/// Mutating aggregate methods record events here; `drain()` hands them off at
/// save time. The recorder is deliberately excluded from aggregate equality.
#[derive(Debug, Default, Clone)]
pub struct RecordedEvents(Vec<DomainEvent>);

impl RecordedEvents {
    pub fn record(&mut self, event: DomainEvent) {
        self.0.push(event);
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[DomainEvent] {
        &self.0
    }
}
