//! Capability guard: plan-constraint enforcement.
//!
//! Before an operation consumes a plan-limited resource, the owning service
//! asks the guard registry whether the space's constraint set still allows
//! it. Lookup semantics:
//!
//! - constraint absent from the space's set: allow silently (abstain);
//! - constraint present, guard registered: the guard reads current usage and
//!   decides, optionally emitting non-blocking warnings;
//! - constraint present, no guard registered: `ConstraintNotRegistered`, a
//!   configuration error.
//!
//! Limits are re-evaluated against the current configuration on every call.
//! Usage that already exceeds a shrunken limit never fails retroactively; it
//! only blocks new allocation. The check-then-act window between the usage
//! read and the subsequent insert is deliberately unprotected.

pub mod guards;

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    error::{capability::CapabilityError, AppError},
    model::{constraint::ConstraintKind, space::Space},
    service::capability::guards::{
        FtpUserCountGuard, MailForwardCountGuard, MailboxCountGuard, StorageQuotaGuard,
        SubDomainCountGuard,
    },
};

/// Operation-specific context handed to a guard, e.g. the requested mailbox
/// size for the storage guard.
#[derive(Debug, Default, Clone)]
pub struct GuardContext {
    values: HashMap<&'static str, i64>,
}

impl GuardContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: i64) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }
}

/// Non-blocking message emitted by a guard, e.g. "80% of the quota in use".
#[derive(Debug, Clone, PartialEq)]
pub struct GuardWarning {
    pub message_id: &'static str,
    pub arguments: serde_json::Value,
}

/// Outcome of a single guard evaluation.
#[derive(Debug)]
pub enum Verdict {
    Pass { warnings: Vec<GuardWarning> },
    Fail(CapabilityError),
}

/// Type-specific validator for one constraint kind.
#[async_trait::async_trait]
pub trait ConstraintGuard: Send + Sync {
    /// Decides whether the operation fits within `limit`, reading current
    /// usage from the database.
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError>;
}

/// Registry of constraint guards keyed by constraint kind.
pub struct CapabilityGuards {
    guards: HashMap<ConstraintKind, Box<dyn ConstraintGuard>>,
}

impl CapabilityGuards {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
        }
    }

    /// Registry with the standard guard set.
    ///
    /// `MonthlyTraffic` has no guard on purpose: traffic is accounted
    /// outside this system and no operation in the panel allocates it.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ConstraintKind::StorageQuota, Box::new(StorageQuotaGuard));
        registry.register(ConstraintKind::MailboxCount, Box::new(MailboxCountGuard));
        registry.register(
            ConstraintKind::MailForwardCount,
            Box::new(MailForwardCountGuard),
        );
        registry.register(ConstraintKind::FtpUserCount, Box::new(FtpUserCountGuard));
        registry.register(ConstraintKind::SubDomainCount, Box::new(SubDomainCountGuard));
        registry
    }

    pub fn register(&mut self, kind: ConstraintKind, guard: Box<dyn ConstraintGuard>) {
        self.guards.insert(kind, guard);
    }

    /// Checks whether the operation named by `kind` is allowed for the
    /// space.
    ///
    /// Returns the guard's warnings on pass; the caller decides whether to
    /// surface or log them.
    pub async fn allows(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        kind: ConstraintKind,
        context: &GuardContext,
    ) -> Result<Vec<GuardWarning>, AppError> {
        let Some(limit) = space.constraints.get(kind) else {
            // Constraint not in the set: abstain.
            return Ok(Vec::new());
        };

        let Some(guard) = self.guards.get(&kind) else {
            return Err(CapabilityError::ConstraintNotRegistered { kind }.into());
        };

        match guard.evaluate(db, space, limit, context).await? {
            Verdict::Pass { warnings } => {
                for warning in &warnings {
                    tracing::warn!(
                        space = %space.id,
                        constraint = %kind,
                        message_id = warning.message_id,
                        "constraint warning"
                    );
                }
                Ok(warnings)
            }
            Verdict::Fail(err) => Err(err.into()),
        }
    }
}

impl Default for CapabilityGuards {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{constraint::Constraints, space::Space};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use test_utils::builder::TestBuilder;
    use test_utils::factory::{
        domain_name::DomainNameFactory, mailbox::MailboxFactory, space::SpaceFactory,
        user::create_user,
    };

    async fn space_with_constraints(
        db: &sea_orm::DatabaseConnection,
        constraints: Constraints,
    ) -> Space {
        let user = create_user(db).await.unwrap();
        let entity = SpaceFactory::new(db)
            .owner_user_id(user.id)
            .constraints(constraints.to_json())
            .build()
            .await
            .unwrap();
        Space::from_entity(entity).unwrap()
    }

    fn all_tables() -> TestBuilder {
        TestBuilder::new().with_space_tables()
    }

    #[tokio::test]
    async fn absent_constraint_abstains() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(db, Constraints::default()).await;

        let warnings = CapabilityGuards::standard()
            .allows(db, &space, ConstraintKind::MailboxCount, &GuardContext::new())
            .await
            .unwrap();

        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn missing_guard_is_a_configuration_error() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::MonthlyTraffic, 500),
        )
        .await;

        let err = CapabilityGuards::standard()
            .allows(
                db,
                &space,
                ConstraintKind::MonthlyTraffic,
                &GuardContext::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::error::AppError::CapabilityErr(CapabilityError::ConstraintNotRegistered {
                kind: ConstraintKind::MonthlyTraffic
            })
        ));
    }

    #[tokio::test]
    async fn count_guard_blocks_at_the_limit() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::MailboxCount, 2),
        )
        .await;
        let domain = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        for _ in 0..2 {
            MailboxFactory::new(db)
                .space_id(space.id)
                .domain_name_id(domain.id)
                .build()
                .await
                .unwrap();
        }

        let err = CapabilityGuards::standard()
            .allows(db, &space, ConstraintKind::MailboxCount, &GuardContext::new())
            .await
            .unwrap_err();

        match err {
            crate::error::AppError::CapabilityErr(CapabilityError::ConstraintExceeded {
                kind,
                space_id,
                ..
            }) => {
                assert_eq!(kind, ConstraintKind::MailboxCount);
                assert_eq!(space_id, space.id);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn count_guard_allows_below_the_limit() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::MailboxCount, 5),
        )
        .await;
        let domain = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        MailboxFactory::new(db)
            .space_id(space.id)
            .domain_name_id(domain.id)
            .build()
            .await
            .unwrap();

        let warnings = CapabilityGuards::standard()
            .allows(db, &space, ConstraintKind::MailboxCount, &GuardContext::new())
            .await
            .unwrap();

        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn count_guard_warns_near_the_limit() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::MailboxCount, 5),
        )
        .await;
        let domain = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        for _ in 0..4 {
            MailboxFactory::new(db)
                .space_id(space.id)
                .domain_name_id(domain.id)
                .build()
                .await
                .unwrap();
        }

        let warnings = CapabilityGuards::standard()
            .allows(db, &space, ConstraintKind::MailboxCount, &GuardContext::new())
            .await
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message_id, "constraint.approaching_limit");
    }

    #[tokio::test]
    async fn shrunken_limit_blocks_new_allocation_only() {
        // Three mailboxes exist, the limit later shrank to two: checking is
        // a failure for *new* allocation, but existing usage stays valid and
        // a constraint kind that is absent still abstains.
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let mut space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::MailboxCount, 10),
        )
        .await;
        let domain = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        for _ in 0..3 {
            MailboxFactory::new(db)
                .space_id(space.id)
                .domain_name_id(domain.id)
                .build()
                .await
                .unwrap();
        }

        space.constraints = Constraints::default().with(ConstraintKind::MailboxCount, 2);

        let err = CapabilityGuards::standard()
            .allows(db, &space, ConstraintKind::MailboxCount, &GuardContext::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::CapabilityErr(CapabilityError::ConstraintExceeded { .. })
        ));

        // The existing mailboxes themselves are untouched.
        let count = entity::prelude::Mailbox::find()
            .filter(entity::mailbox::Column::SpaceId.eq(space.id))
            .count(db)
            .await
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn storage_guard_accounts_requested_size() {
        let test = all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let space = space_with_constraints(
            db,
            Constraints::default().with(ConstraintKind::StorageQuota, 1000),
        )
        .await;
        let domain = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        MailboxFactory::new(db)
            .space_id(space.id)
            .domain_name_id(domain.id)
            .size_quota(600)
            .build()
            .await
            .unwrap();

        let guards = CapabilityGuards::standard();

        // 600 used + 300 requested fits into 1000.
        guards
            .allows(
                db,
                &space,
                ConstraintKind::StorageQuota,
                &GuardContext::new().with("size", 300),
            )
            .await
            .unwrap();

        // 600 used + 500 requested does not.
        let err = guards
            .allows(
                db,
                &space,
                ConstraintKind::StorageQuota,
                &GuardContext::new().with("size", 500),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::CapabilityErr(CapabilityError::ConstraintExceeded { .. })
        ));
    }

    #[test]
    fn unknown_constraint_names_are_reported() {
        let err = "bandwidth".parse::<ConstraintKind>().unwrap_err();
        assert_eq!(
            err,
            CapabilityError::UnknownConstraint {
                name: "bandwidth".to_string()
            }
        );
    }
}
