//! Domain-name service.
//!
//! Registration validates the requested name against the public-suffix list;
//! transfer and removal run through the usage guard and the aggregate's
//! primary-marking invariants.

use uuid::Uuid;

use crate::{
    data::{domain_name::DomainNameRepository, space::SpaceRepository},
    error::{domain::DomainError, AppError},
    model::domain_name::DomainName,
    service::domain_usage::UsageCheckedOperation,
    state::AppState,
};

pub struct DomainNameService<'a> {
    state: &'a AppState,
}

impl<'a> DomainNameService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn domain_names(&self) -> DomainNameRepository<'_> {
        DomainNameRepository::new(&self.state.db)
    }

    /// Registers a domain name from its FQDN, optionally assigning it to a
    /// space in the same operation.
    pub async fn register(
        &self,
        fqdn: &str,
        id: Uuid,
        space_id: Option<Uuid>,
    ) -> Result<DomainName, AppError> {
        let (name, tld) = self.state.public_suffix.split_fqdn(fqdn).await?;

        let domain_names = self.domain_names();
        if domain_names.find_by_name_and_tld(&name, &tld).await?.is_some() {
            return Err(DomainError::DomainNameAlreadyRegistered { name, tld }.into());
        }

        let mut domain_name = DomainName::register(id, name, tld);

        if let Some(space_id) = space_id {
            let primary = self.prepare_assignment(space_id).await?;
            domain_name.assign_to_space(space_id, primary);
        }

        let events = domain_names.insert(&mut domain_name).await?;
        self.state.events.dispatch_all(events).await;

        Ok(domain_name)
    }

    /// Assigns an unassigned domain name to a space. The first domain name
    /// of a space becomes its primary.
    pub async fn assign_to_space(
        &self,
        domain_name_id: Uuid,
        space_id: Uuid,
    ) -> Result<DomainName, AppError> {
        let domain_names = self.domain_names();
        let mut domain_name = self.load(domain_name_id).await?;

        if let Some(current) = domain_name.space_id {
            return Err(DomainError::DomainNameNotAssignedToSpace {
                domain_name_id,
                space_id: current,
            }
            .into());
        }

        let primary = self.prepare_assignment(space_id).await?;
        domain_name.assign_to_space(space_id, primary);

        let events = domain_names.update(&mut domain_name).await?;
        self.state.events.dispatch_all(events).await;

        Ok(domain_name)
    }

    /// Marks a domain name primary for its space, swapping the previous
    /// primary in the same operation.
    pub async fn mark_primary(&self, domain_name_id: Uuid) -> Result<DomainName, AppError> {
        let domain_names = self.domain_names();
        let mut domain_name = self.load(domain_name_id).await?;

        let Some(space_id) = domain_name.space_id else {
            return Err(DomainError::DomainNameNotAssignedToSpace {
                domain_name_id,
                space_id: Uuid::nil(),
            }
            .into());
        };

        if let Some(mut previous) = domain_names.find_primary_of_space(space_id).await? {
            if previous.id != domain_name.id {
                previous.unmark_primary();
                domain_names.update(&mut previous).await?;
            }
        }

        domain_name.mark_primary()?;
        let events = domain_names.update(&mut domain_name).await?;
        self.state.events.dispatch_all(events).await;

        Ok(domain_name)
    }

    /// Transfers a domain name to another space.
    ///
    /// Blocked while primary, and while any dependent entity of the current
    /// space still references the domain name.
    pub async fn transfer(
        &self,
        domain_name_id: Uuid,
        to_space_id: Uuid,
    ) -> Result<DomainName, AppError> {
        let domain_names = self.domain_names();
        let mut domain_name = self.load(domain_name_id).await?;

        self.state
            .domain_usage_guard
            .ensure_unused(&self.state.db, &domain_name, UsageCheckedOperation::Transfer)
            .await?;

        let target = SpaceRepository::new(&self.state.db)
            .find_by_id(to_space_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Target space not found".to_string()))?;
        target.ensure_active()?;

        domain_name.transfer_to(to_space_id)?;

        let events = domain_names.update(&mut domain_name).await?;
        self.state.events.dispatch_all(events).await;

        Ok(domain_name)
    }

    /// Removes a domain name.
    ///
    /// Blocked while primary, and while any dependent entity still
    /// references it; the usage conflict is reported with the removal error
    /// type carrying the same payload as a transfer conflict.
    pub async fn remove(&self, domain_name_id: Uuid) -> Result<(), AppError> {
        let domain_names = self.domain_names();
        let mut domain_name = self.load(domain_name_id).await?;

        self.state
            .domain_usage_guard
            .ensure_unused(&self.state.db, &domain_name, UsageCheckedOperation::Removal)
            .await?;

        domain_name.prepare_removal()?;

        let events = domain_names.remove(&mut domain_name).await?;
        self.state.events.dispatch_all(events).await;

        Ok(())
    }

    pub async fn get(&self, domain_name_id: Uuid) -> Result<Option<DomainName>, AppError> {
        self.domain_names().find_by_id(domain_name_id).await
    }

    pub async fn get_all(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<DomainName>, u64), AppError> {
        self.domain_names().get_all_paginated(page, per_page).await
    }

    pub async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<DomainName>, AppError> {
        self.domain_names().find_by_space(space_id).await
    }

    async fn load(&self, domain_name_id: Uuid) -> Result<DomainName, AppError> {
        self.domain_names()
            .find_by_id(domain_name_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Domain name not found".to_string()))
    }

    /// Validates the target space and decides whether the new assignment
    /// becomes primary (it does when the space has none yet).
    async fn prepare_assignment(&self, space_id: Uuid) -> Result<bool, AppError> {
        let space = SpaceRepository::new(&self.state.db)
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Space not found".to_string()))?;
        space.ensure_active()?;

        let existing_primary = self
            .domain_names()
            .find_primary_of_space(space_id)
            .await?;

        Ok(existing_primary.is_none())
    }
}
