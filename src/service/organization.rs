//! Organization service: lifecycle, membership, guarded removal.

use uuid::Uuid;

use crate::{
    data::{
        domain_name::DomainNameRepository, organization::OrganizationRepository,
        space::SpaceRepository, user::UserRepository,
    },
    error::{domain::BlockingEntity, AppError},
    model::{
        event::DomainEvent,
        organization::{
            AddMemberParam, CreateOrganizationParam, Organization, OrganizationMember,
        },
    },
    state::AppState,
};

pub struct OrganizationService<'a> {
    state: &'a AppState,
}

impl<'a> OrganizationService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn organizations(&self) -> OrganizationRepository<'_> {
        OrganizationRepository::new(&self.state.db)
    }

    pub async fn create(&self, param: CreateOrganizationParam) -> Result<Organization, AppError> {
        let mut organization = if param.internal {
            Organization::create_internal(param.id, param.name)
        } else {
            Organization::create(param.id, param.name)
        };

        let events = self.organizations().insert(&mut organization).await?;
        self.state.events.dispatch_all(events).await;

        Ok(organization)
    }

    pub async fn rename(&self, organization_id: Uuid, name: String) -> Result<Organization, AppError> {
        let organizations = self.organizations();

        let Some(mut organization) = organizations.find_by_id(organization_id).await? else {
            return Err(AppError::NotFound("Organization not found".to_string()));
        };

        organization.rename(name);
        let events = organizations.update(&mut organization).await?;
        self.state.events.dispatch_all(events).await;

        Ok(organization)
    }

    pub async fn get(&self, organization_id: Uuid) -> Result<Option<Organization>, AppError> {
        self.organizations().find_by_id(organization_id).await
    }

    pub async fn get_all(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Organization>, u64), AppError> {
        self.organizations().get_all_paginated(page, per_page).await
    }

    pub async fn get_members(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<OrganizationMember>, AppError> {
        self.organizations().get_members(organization_id).await
    }

    /// Adds a member or changes an existing member's access level.
    ///
    /// Last-write-wins: re-adding a user replaces their level, a user never
    /// appears twice.
    pub async fn add_member(&self, param: AddMemberParam) -> Result<OrganizationMember, AppError> {
        let organizations = self.organizations();

        if organizations.find_by_id(param.organization_id).await?.is_none() {
            return Err(AppError::NotFound("Organization not found".to_string()));
        }

        let users = UserRepository::new(&self.state.db, self.state.hash_strategy.as_ref());
        if users.find_by_id(param.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let member = organizations.upsert_member(param).await?;

        self.state
            .events
            .dispatch(&DomainEvent::OrganizationMemberAdded {
                organization_id: member.organization_id,
                user_id: member.user_id,
                level: member.level.as_str().to_string(),
            })
            .await;

        Ok(member)
    }

    pub async fn remove_member(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let removed = self
            .organizations()
            .remove_member(organization_id, user_id)
            .await?;

        if !removed {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        self.state
            .events
            .dispatch(&DomainEvent::OrganizationMemberRemoved {
                organization_id,
                user_id,
            })
            .await;

        Ok(())
    }

    /// Removes an organization.
    ///
    /// Blocked while the organization still owns spaces or domain names
    /// (the error lists the blockers by type) and always blocked for the
    /// reserved internal organization.
    pub async fn remove(&self, organization_id: Uuid) -> Result<(), AppError> {
        let organizations = self.organizations();

        let Some(mut organization) = organizations.find_by_id(organization_id).await? else {
            return Err(AppError::NotFound("Organization not found".to_string()));
        };

        let blocking = self.collect_blocking_entities(organization_id).await?;
        organization.prepare_removal(blocking)?;

        let events = organizations.remove(&mut organization).await?;
        self.state.events.dispatch_all(events).await;

        Ok(())
    }

    /// Spaces owned by the organization plus the domain names assigned to
    /// them, as reported in the removal error.
    async fn collect_blocking_entities(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<BlockingEntity>, AppError> {
        let spaces = SpaceRepository::new(&self.state.db)
            .find_by_owner_organization(organization_id)
            .await?;
        let space_ids: Vec<Uuid> = spaces.iter().map(|s| s.id).collect();

        let mut blocking: Vec<BlockingEntity> = spaces
            .iter()
            .map(|space| BlockingEntity::new("space", space.id, space.id.to_string()))
            .collect();

        let domain_names = DomainNameRepository::new(&self.state.db)
            .find_by_spaces(&space_ids)
            .await?;
        blocking.extend(
            domain_names
                .iter()
                .map(|d| BlockingEntity::new("domain_name", d.id, d.fqdn())),
        );

        Ok(blocking)
    }

    /// Seeds the reserved internal administrator organization when missing.
    /// Called once at startup.
    pub async fn ensure_internal_organization(&self) -> Result<Organization, AppError> {
        let organizations = self.organizations();

        if let Some(existing) = organizations.find_internal().await? {
            return Ok(existing);
        }

        tracing::info!("Seeding internal administrator organization");
        self.create(CreateOrganizationParam {
            id: Uuid::new_v4(),
            name: "Administrators".to_string(),
            internal: true,
        })
        .await
    }
}
