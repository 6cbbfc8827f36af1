//! Mailbox and mail-forward service.

use uuid::Uuid;

use crate::{
    data::mailbox::{MailForwardRepository, MailboxRepository},
    error::{domain::DomainError, AppError},
    model::{
        constraint::ConstraintKind,
        mailbox::{MailForward, Mailbox, RegisterMailForwardParam, RegisterMailboxParam},
    },
    service::{
        capability::GuardContext,
        ftp_user::{ensure_domain_in_space, load_active_space},
    },
    state::AppState,
    util::password,
};

pub struct MailboxService<'a> {
    state: &'a AppState,
}

impl<'a> MailboxService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers a mailbox.
    ///
    /// Capability-guarded against `mailbox_count` and against
    /// `storage_quota` with the requested size.
    pub async fn register(&self, param: RegisterMailboxParam) -> Result<Mailbox, AppError> {
        let space = load_active_space(self.state, param.space_id).await?;
        let domain =
            ensure_domain_in_space(self.state, param.domain_name_id, param.space_id).await?;

        let mailboxes = MailboxRepository::new(&self.state.db);
        if mailboxes
            .address_exists(param.domain_name_id, &param.address)
            .await?
        {
            return Err(DomainError::AddressAlreadyExists {
                address: param.address,
                domain,
            }
            .into());
        }

        let guards = &self.state.capability_guards;
        guards
            .allows(
                &self.state.db,
                &space,
                ConstraintKind::MailboxCount,
                &GuardContext::new(),
            )
            .await?;
        guards
            .allows(
                &self.state.db,
                &space,
                ConstraintKind::StorageQuota,
                &GuardContext::new().with("size", param.size_quota),
            )
            .await?;

        let mailbox = Mailbox::register(
            param.id,
            param.space_id,
            param.domain_name_id,
            param.address,
            param.size_quota,
            password::hash_password(&param.password)?,
        );
        mailboxes.insert(&mailbox).await?;

        Ok(mailbox)
    }

    /// Changes a mailbox's size quota; growth is checked against the
    /// storage quota.
    pub async fn resize(&self, mailbox_id: Uuid, size_quota: i64) -> Result<Mailbox, AppError> {
        let mailboxes = MailboxRepository::new(&self.state.db);

        let Some(mut mailbox) = mailboxes.find_by_id(mailbox_id).await? else {
            return Err(AppError::NotFound("Mailbox not found".to_string()));
        };

        let space = load_active_space(self.state, mailbox.space_id).await?;

        let growth = size_quota - mailbox.size_quota;
        if growth > 0 {
            self.state
                .capability_guards
                .allows(
                    &self.state.db,
                    &space,
                    ConstraintKind::StorageQuota,
                    &GuardContext::new().with("size", growth),
                )
                .await?;
        }

        mailbox.resize(size_quota);
        mailboxes.update(&mailbox).await?;

        Ok(mailbox)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Mailbox>, AppError> {
        MailboxRepository::new(&self.state.db).find_by_id(id).await
    }

    pub async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<Mailbox>, AppError> {
        MailboxRepository::new(&self.state.db)
            .find_by_space(space_id)
            .await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mailboxes = MailboxRepository::new(&self.state.db);

        if mailboxes.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Mailbox not found".to_string()));
        }

        mailboxes.delete(id).await
    }

    /// Registers a mail forward, capability-guarded against
    /// `mail_forward_count`.
    pub async fn register_forward(
        &self,
        param: RegisterMailForwardParam,
    ) -> Result<MailForward, AppError> {
        let space = load_active_space(self.state, param.space_id).await?;
        let domain =
            ensure_domain_in_space(self.state, param.domain_name_id, param.space_id).await?;

        let forwards = MailForwardRepository::new(&self.state.db);
        if forwards
            .address_exists(param.domain_name_id, &param.address)
            .await?
        {
            return Err(DomainError::AddressAlreadyExists {
                address: param.address,
                domain,
            }
            .into());
        }

        self.state
            .capability_guards
            .allows(
                &self.state.db,
                &space,
                ConstraintKind::MailForwardCount,
                &GuardContext::new(),
            )
            .await?;

        let forward = MailForward::register(
            param.id,
            param.space_id,
            param.domain_name_id,
            param.address,
            param.destination,
        );
        forwards.insert(&forward).await?;

        Ok(forward)
    }

    pub async fn list_forwards_by_space(
        &self,
        space_id: Uuid,
    ) -> Result<Vec<MailForward>, AppError> {
        MailForwardRepository::new(&self.state.db)
            .find_by_space(space_id)
            .await
    }

    pub async fn remove_forward(&self, id: Uuid) -> Result<(), AppError> {
        let forwards = MailForwardRepository::new(&self.state.db);

        if forwards.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Mail forward not found".to_string()));
        }

        forwards.delete(id).await
    }
}
