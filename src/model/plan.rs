//! Webhosting plan: a labelled, reusable constraint set.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::plan::PlanDto,
    error::AppError,
    model::{
        constraint::Constraints,
        event::{DomainEvent, RecordedEvents},
    },
};

#[derive(Debug, Clone)]
pub struct Plan {
    pub id: Uuid,
    pub label: String,
    pub constraints: Constraints,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: RecordedEvents,
}

impl Plan {
    pub fn create(id: Uuid, label: impl Into<String>, constraints: Constraints) -> Self {
        let now = Utc::now();

        Self {
            id,
            label: label.into(),
            constraints,
            created_at: now,
            updated_at: now,
            events: RecordedEvents::default(),
        }
    }

    pub fn rename(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.updated_at = Utc::now();
    }

    /// Replaces the constraint set.
    ///
    /// Records a `PlanConstraintsChanged` event only when the new set
    /// actually differs; assigning an equal set is a no-op.
    pub fn change_constraints(&mut self, constraints: Constraints) {
        if self.constraints == constraints {
            return;
        }

        self.constraints = constraints.clone();
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::PlanConstraintsChanged {
            plan_id: self.id,
            constraints,
        });
    }

    pub fn into_dto(self) -> PlanDto {
        PlanDto {
            id: self.id,
            label: self.label,
            constraints: self.constraints,
        }
    }

    pub fn from_entity(entity: entity::plan::Model) -> Result<Self, AppError> {
        let constraints = Constraints::from_json(&entity.constraints).map_err(|e| {
            AppError::InternalError(format!(
                "Failed to decode constraints of plan {}: {}",
                entity.id, e
            ))
        })?;

        Ok(Self {
            id: entity.id,
            label: entity.label,
            constraints,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            events: RecordedEvents::default(),
        })
    }
}

/// Parameters for creating a plan.
#[derive(Debug, Clone)]
pub struct CreatePlanParam {
    pub id: Uuid,
    pub label: String,
    pub constraints: Constraints,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constraint::ConstraintKind;

    #[test]
    fn equal_constraint_set_records_no_event() {
        let constraints = Constraints::default().with(ConstraintKind::MailboxCount, 25);
        let mut plan = Plan::create(Uuid::new_v4(), "Starter", constraints.clone());

        plan.change_constraints(constraints);

        assert!(plan.events.is_empty());
    }

    #[test]
    fn different_constraint_set_records_exactly_one_event() {
        let mut plan = Plan::create(
            Uuid::new_v4(),
            "Starter",
            Constraints::default().with(ConstraintKind::MailboxCount, 25),
        );

        let next = Constraints::default().with(ConstraintKind::MailboxCount, 50);
        plan.change_constraints(next.clone());

        assert_eq!(
            plan.events.as_slice(),
            &[DomainEvent::PlanConstraintsChanged {
                plan_id: plan.id,
                constraints: next.clone(),
            }]
        );
        assert_eq!(plan.constraints, next);
    }
}
