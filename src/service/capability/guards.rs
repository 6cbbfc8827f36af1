//! Standard constraint guard implementations.
//!
//! Count guards compare the current entity count of the space plus the
//! requested amount against the configured limit. The storage guard sums the
//! size quotas of the space's mailboxes and adds the requested size from the
//! context. All guards warn without blocking once usage reaches 80% of the
//! limit.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    data::{
        ftp_user::FtpUserRepository,
        mailbox::{MailForwardRepository, MailboxRepository},
        sub_domain::SubDomainRepository,
    },
    error::{capability::CapabilityError, AppError},
    model::{constraint::ConstraintKind, space::Space},
    service::capability::{ConstraintGuard, GuardContext, GuardWarning, Verdict},
};

/// Fraction of the limit at which a pass still carries a warning.
const WARNING_RATIO: f64 = 0.8;

/// Shared decision logic for "usage + requested <= limit" guards.
fn decide(kind: ConstraintKind, space: &Space, current: i64, requested: i64, limit: i64) -> Verdict {
    let projected = current + requested;

    if projected > limit {
        return Verdict::Fail(CapabilityError::ConstraintExceeded {
            kind,
            space_id: space.id,
            message_id: "constraint.exceeded",
            arguments: json!({
                "constraint": kind.as_str(),
                "limit": limit,
                "current": current,
                "requested": requested,
            }),
        });
    }

    let mut warnings = Vec::new();
    if limit > 0 && projected as f64 >= limit as f64 * WARNING_RATIO {
        warnings.push(GuardWarning {
            message_id: "constraint.approaching_limit",
            arguments: json!({
                "constraint": kind.as_str(),
                "limit": limit,
                "current": projected,
            }),
        });
    }

    Verdict::Pass { warnings }
}

fn requested(context: &GuardContext) -> i64 {
    context.get("requested").unwrap_or(1)
}

pub struct MailboxCountGuard;

#[async_trait::async_trait]
impl ConstraintGuard for MailboxCountGuard {
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError> {
        let current = MailboxRepository::new(db).count_by_space(space.id).await? as i64;

        Ok(decide(
            ConstraintKind::MailboxCount,
            space,
            current,
            requested(context),
            limit,
        ))
    }
}

pub struct MailForwardCountGuard;

#[async_trait::async_trait]
impl ConstraintGuard for MailForwardCountGuard {
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError> {
        let current = MailForwardRepository::new(db)
            .count_by_space(space.id)
            .await? as i64;

        Ok(decide(
            ConstraintKind::MailForwardCount,
            space,
            current,
            requested(context),
            limit,
        ))
    }
}

pub struct FtpUserCountGuard;

#[async_trait::async_trait]
impl ConstraintGuard for FtpUserCountGuard {
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError> {
        let current = FtpUserRepository::new(db).count_by_space(space.id).await? as i64;

        Ok(decide(
            ConstraintKind::FtpUserCount,
            space,
            current,
            requested(context),
            limit,
        ))
    }
}

pub struct SubDomainCountGuard;

#[async_trait::async_trait]
impl ConstraintGuard for SubDomainCountGuard {
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError> {
        let current = SubDomainRepository::new(db).count_by_space(space.id).await? as i64;

        Ok(decide(
            ConstraintKind::SubDomainCount,
            space,
            current,
            requested(context),
            limit,
        ))
    }
}

/// Storage guard: mailbox size quotas count against the space's storage
/// quota; the requested size arrives through the `size` context key.
pub struct StorageQuotaGuard;

#[async_trait::async_trait]
impl ConstraintGuard for StorageQuotaGuard {
    async fn evaluate(
        &self,
        db: &DatabaseConnection,
        space: &Space,
        limit: i64,
        context: &GuardContext,
    ) -> Result<Verdict, AppError> {
        let current = MailboxRepository::new(db)
            .total_size_quota_by_space(space.id)
            .await?;
        let size = context.get("size").unwrap_or(0);

        Ok(decide(
            ConstraintKind::StorageQuota,
            space,
            current,
            size,
            limit,
        ))
    }
}
