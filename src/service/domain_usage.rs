//! Domain-name usage validation.
//!
//! A domain name that is about to be transferred to another space or removed
//! must not be referenced by any dependent entity under its current space.
//! One validator per entity type reports the referencing entities; the guard
//! fans out over all validators, aggregates the results and raises a typed
//! error carrying the blocking entities, capped for display.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{
        ftp_user::FtpUserRepository,
        mailbox::{MailForwardRepository, MailboxRepository},
        sub_domain::SubDomainRepository,
    },
    error::{
        domain::{BlockingEntity, DomainError},
        AppError,
    },
    model::domain_name::DomainName,
};

/// At most this many blocking entities are reported back to the client.
pub const MAX_REPORTED_USAGES: usize = 20;

/// Operation being validated; decides which error type a conflict raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageCheckedOperation {
    Transfer,
    Removal,
}

/// Per-entity-type lookup of entities still referencing a domain name under
/// its current space.
#[async_trait]
pub trait DomainNameUsageValidator: Send + Sync {
    async fn find_usages(
        &self,
        db: &DatabaseConnection,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError>;
}

pub struct MailboxUsageValidator;

#[async_trait]
impl DomainNameUsageValidator for MailboxUsageValidator {
    async fn find_usages(
        &self,
        db: &DatabaseConnection,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError> {
        let mailboxes = MailboxRepository::new(db)
            .find_by_space_and_domain(space_id, domain_name_id)
            .await?;

        Ok(mailboxes
            .into_iter()
            .map(|m| BlockingEntity::new("mailbox", m.id, m.address))
            .collect())
    }
}

pub struct MailForwardUsageValidator;

#[async_trait]
impl DomainNameUsageValidator for MailForwardUsageValidator {
    async fn find_usages(
        &self,
        db: &DatabaseConnection,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError> {
        let forwards = MailForwardRepository::new(db)
            .find_by_space_and_domain(space_id, domain_name_id)
            .await?;

        Ok(forwards
            .into_iter()
            .map(|f| BlockingEntity::new("mail_forward", f.id, f.address))
            .collect())
    }
}

pub struct FtpUserUsageValidator;

#[async_trait]
impl DomainNameUsageValidator for FtpUserUsageValidator {
    async fn find_usages(
        &self,
        db: &DatabaseConnection,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError> {
        let ftp_users = FtpUserRepository::new(db)
            .find_by_space_and_domain(space_id, domain_name_id)
            .await?;

        Ok(ftp_users
            .into_iter()
            .map(|u| BlockingEntity::new("ftp_user", u.id, u.username))
            .collect())
    }
}

pub struct SubDomainUsageValidator;

#[async_trait]
impl DomainNameUsageValidator for SubDomainUsageValidator {
    async fn find_usages(
        &self,
        db: &DatabaseConnection,
        space_id: Uuid,
        domain_name_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError> {
        let sub_domains = SubDomainRepository::new(db)
            .find_by_space_and_domain(space_id, domain_name_id)
            .await?;

        Ok(sub_domains
            .into_iter()
            .map(|s| BlockingEntity::new("sub_domain", s.id, s.host))
            .collect())
    }
}

/// Fan-out guard over all registered usage validators.
pub struct DomainNameUsageGuard {
    validators: Vec<Box<dyn DomainNameUsageValidator>>,
}

impl DomainNameUsageGuard {
    pub fn new(validators: Vec<Box<dyn DomainNameUsageValidator>>) -> Self {
        Self { validators }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MailboxUsageValidator),
            Box::new(MailForwardUsageValidator),
            Box::new(FtpUserUsageValidator),
            Box::new(SubDomainUsageValidator),
        ])
    }

    /// Verifies no dependent entity still references the domain name under
    /// its current space.
    ///
    /// An unassigned domain name has no dependents by definition. On
    /// conflict the transfer error is raised, re-typed as the removal error
    /// when the triggering operation was a removal, with the same payload.
    pub async fn ensure_unused(
        &self,
        db: &DatabaseConnection,
        domain_name: &DomainName,
        operation: UsageCheckedOperation,
    ) -> Result<(), AppError> {
        let Some(space_id) = domain_name.space_id else {
            return Ok(());
        };

        let mut usages = Vec::new();
        let mut truncated = false;

        for validator in &self.validators {
            let found = validator.find_usages(db, space_id, domain_name.id).await?;

            for usage in found {
                if usages.len() >= MAX_REPORTED_USAGES {
                    truncated = true;
                    break;
                }
                usages.push(usage);
            }
        }

        if usages.is_empty() {
            return Ok(());
        }

        let err = match operation {
            UsageCheckedOperation::Transfer => DomainError::CannotTransferInUseDomainName {
                domain_name_id: domain_name.id,
                usages,
                truncated,
            },
            UsageCheckedOperation::Removal => DomainError::CannotRemoveInUseDomainName {
                domain_name_id: domain_name.id,
                usages,
                truncated,
            },
        };

        Err(err.into())
    }
}

impl Default for DomainNameUsageGuard {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::domain_name::DomainName;
    use test_utils::builder::TestBuilder;
    use test_utils::factory::{
        domain_name::DomainNameFactory, ftp_user::FtpUserFactory, mailbox::MailboxFactory,
        space::create_space_for_user, user::create_user,
    };

    #[tokio::test]
    async fn unused_domain_name_passes_both_checks() {
        let test = TestBuilder::new().with_space_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = create_user(db).await.unwrap();
        let space = create_space_for_user(db, user.id).await.unwrap();
        let entity = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        let domain_name = DomainName::from_entity(entity);

        let guard = DomainNameUsageGuard::standard();
        guard
            .ensure_unused(db, &domain_name, UsageCheckedOperation::Transfer)
            .await
            .unwrap();
        guard
            .ensure_unused(db, &domain_name, UsageCheckedOperation::Removal)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn in_use_domain_name_blocks_with_typed_errors() {
        let test = TestBuilder::new().with_space_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = create_user(db).await.unwrap();
        let space = create_space_for_user(db, user.id).await.unwrap();
        let entity = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        let domain_name = DomainName::from_entity(entity);

        MailboxFactory::new(db)
            .space_id(space.id)
            .domain_name_id(domain_name.id)
            .address("info")
            .build()
            .await
            .unwrap();
        FtpUserFactory::new(db)
            .space_id(space.id)
            .domain_name_id(domain_name.id)
            .username("deploy")
            .build()
            .await
            .unwrap();

        let guard = DomainNameUsageGuard::standard();

        let transfer_err = guard
            .ensure_unused(db, &domain_name, UsageCheckedOperation::Transfer)
            .await
            .unwrap_err();
        match transfer_err {
            AppError::DomainErr(DomainError::CannotTransferInUseDomainName {
                usages,
                truncated,
                ..
            }) => {
                let kinds: Vec<_> = usages.iter().map(|u| u.kind.as_str()).collect();
                assert_eq!(kinds, vec!["mailbox", "ftp_user"]);
                assert!(!truncated);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Same payload, removal error type.
        let removal_err = guard
            .ensure_unused(db, &domain_name, UsageCheckedOperation::Removal)
            .await
            .unwrap_err();
        assert!(matches!(
            removal_err,
            AppError::DomainErr(DomainError::CannotRemoveInUseDomainName { .. })
        ));
    }

    #[tokio::test]
    async fn reported_usages_are_capped() {
        let test = TestBuilder::new().with_space_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = create_user(db).await.unwrap();
        let space = create_space_for_user(db, user.id).await.unwrap();
        let entity = DomainNameFactory::new(db)
            .space_id(space.id)
            .build()
            .await
            .unwrap();
        let domain_name = DomainName::from_entity(entity);

        for i in 0..(MAX_REPORTED_USAGES + 5) {
            MailboxFactory::new(db)
                .space_id(space.id)
                .domain_name_id(domain_name.id)
                .address(format!("box{i}"))
                .build()
                .await
                .unwrap();
        }

        let err = DomainNameUsageGuard::standard()
            .ensure_unused(db, &domain_name, UsageCheckedOperation::Removal)
            .await
            .unwrap_err();

        match err {
            AppError::DomainErr(DomainError::CannotRemoveInUseDomainName {
                usages,
                truncated,
                ..
            }) => {
                assert_eq!(usages.len(), MAX_REPORTED_USAGES);
                assert!(truncated);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
