//! Space service.

use uuid::Uuid;

use crate::{
    data::{
        organization::OrganizationRepository, plan::PlanRepository, space::SpaceRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        constraint::Constraints,
        owner::Owner,
        space::{RegisterSpaceParam, Space},
    },
    state::AppState,
};

pub struct SpaceService<'a> {
    state: &'a AppState,
}

impl<'a> SpaceService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn spaces(&self) -> SpaceRepository<'_> {
        SpaceRepository::new(&self.state.db)
    }

    /// Registers a space for an owner, with constraints from a plan or an
    /// individually chosen set.
    pub async fn register(&self, param: RegisterSpaceParam) -> Result<Space, AppError> {
        self.ensure_owner_exists(param.owner).await?;

        let mut space = match param.plan_id {
            Some(plan_id) => {
                let Some(plan) = PlanRepository::new(&self.state.db).find_by_id(plan_id).await?
                else {
                    return Err(AppError::NotFound("Plan not found".to_string()));
                };
                Space::register_with_plan(param.id, param.owner, plan.id, plan.constraints)
            }
            None => Space::register_with_constraints(
                param.id,
                param.owner,
                param.constraints.unwrap_or_else(Constraints::default),
            ),
        };

        let events = self.spaces().insert(&mut space).await?;
        self.state.events.dispatch_all(events).await;

        Ok(space)
    }

    pub async fn get(&self, space_id: Uuid) -> Result<Option<Space>, AppError> {
        self.spaces().find_by_id(space_id).await
    }

    pub async fn get_all(&self, page: u64, per_page: u64) -> Result<(Vec<Space>, u64), AppError> {
        self.spaces().get_all_paginated(page, per_page).await
    }

    /// Assigns a plan; the space's constraints become the plan's.
    pub async fn assign_plan(&self, space_id: Uuid, plan_id: Uuid) -> Result<Space, AppError> {
        let spaces = self.spaces();
        let mut space = self.load_active(space_id).await?;

        let Some(plan) = PlanRepository::new(&self.state.db).find_by_id(plan_id).await? else {
            return Err(AppError::NotFound("Plan not found".to_string()));
        };

        space.assign_plan(plan.id, plan.constraints);
        let events = spaces.update(&mut space).await?;
        self.state.events.dispatch_all(events).await;

        Ok(space)
    }

    /// Sets an individual constraint set, detaching the space from its plan.
    pub async fn set_constraints(
        &self,
        space_id: Uuid,
        constraints: Constraints,
    ) -> Result<Space, AppError> {
        let spaces = self.spaces();
        let mut space = self.load_active(space_id).await?;

        space.set_constraints(constraints);
        let events = spaces.update(&mut space).await?;
        self.state.events.dispatch_all(events).await;

        Ok(space)
    }

    pub async fn transfer_owner(&self, space_id: Uuid, owner: Owner) -> Result<Space, AppError> {
        self.ensure_owner_exists(owner).await?;

        let spaces = self.spaces();
        let mut space = self.load_active(space_id).await?;

        space.transfer_owner(owner);
        let events = spaces.update(&mut space).await?;
        self.state.events.dispatch_all(events).await;

        Ok(space)
    }

    /// Marks a space for removal; the purge job deletes it after the grace
    /// period.
    pub async fn mark_for_removal(&self, space_id: Uuid) -> Result<Space, AppError> {
        let spaces = self.spaces();

        let Some(mut space) = spaces.find_by_id(space_id).await? else {
            return Err(AppError::NotFound("Space not found".to_string()));
        };

        space.mark_for_removal();
        let events = spaces.update(&mut space).await?;
        self.state.events.dispatch_all(events).await;

        Ok(space)
    }

    async fn load_active(&self, space_id: Uuid) -> Result<Space, AppError> {
        let Some(space) = self.spaces().find_by_id(space_id).await? else {
            return Err(AppError::NotFound("Space not found".to_string()));
        };

        space.ensure_active()?;

        Ok(space)
    }

    async fn ensure_owner_exists(&self, owner: Owner) -> Result<(), AppError> {
        match owner {
            Owner::User(user_id) => {
                let users =
                    UserRepository::new(&self.state.db, self.state.hash_strategy.as_ref());
                if users.find_by_id(user_id).await?.is_none() {
                    return Err(AppError::NotFound("Owner user not found".to_string()));
                }
            }
            Owner::Organization(organization_id) => {
                let organizations = OrganizationRepository::new(&self.state.db);
                if organizations.find_by_id(organization_id).await?.is_none() {
                    return Err(AppError::NotFound(
                        "Owner organization not found".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
