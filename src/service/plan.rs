//! Plan service.

use uuid::Uuid;

use crate::{
    data::{plan::PlanRepository, space::SpaceRepository},
    error::AppError,
    model::{
        constraint::Constraints,
        plan::{CreatePlanParam, Plan},
    },
    state::AppState,
};

pub struct PlanService<'a> {
    state: &'a AppState,
}

impl<'a> PlanService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn plans(&self) -> PlanRepository<'_> {
        PlanRepository::new(&self.state.db)
    }

    pub async fn create(&self, param: CreatePlanParam) -> Result<Plan, AppError> {
        let mut plan = Plan::create(param.id, param.label, param.constraints);

        let events = self.plans().insert(&mut plan).await?;
        self.state.events.dispatch_all(events).await;

        Ok(plan)
    }

    pub async fn rename(&self, plan_id: Uuid, label: String) -> Result<Plan, AppError> {
        let plans = self.plans();

        let Some(mut plan) = plans.find_by_id(plan_id).await? else {
            return Err(AppError::NotFound("Plan not found".to_string()));
        };

        plan.rename(label);
        let events = plans.update(&mut plan).await?;
        self.state.events.dispatch_all(events).await;

        Ok(plan)
    }

    /// Replaces a plan's constraint set.
    ///
    /// Assigning an equal set records no event and writes nothing of note;
    /// a different set records exactly one `PlanConstraintsChanged`.
    pub async fn change_constraints(
        &self,
        plan_id: Uuid,
        constraints: Constraints,
    ) -> Result<Plan, AppError> {
        let plans = self.plans();

        let Some(mut plan) = plans.find_by_id(plan_id).await? else {
            return Err(AppError::NotFound("Plan not found".to_string()));
        };

        plan.change_constraints(constraints);
        let events = plans.update(&mut plan).await?;
        self.state.events.dispatch_all(events).await;

        Ok(plan)
    }

    /// Pushes the plan's constraints to every space linked to it.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of spaces whose constraint set actually changed
    pub async fn sync_to_spaces(&self, plan_id: Uuid) -> Result<u64, AppError> {
        let Some(plan) = self.plans().find_by_id(plan_id).await? else {
            return Err(AppError::NotFound("Plan not found".to_string()));
        };

        let spaces_repo = SpaceRepository::new(&self.state.db);
        let mut updated = 0;

        for mut space in spaces_repo.find_by_plan(plan_id).await? {
            space.sync_plan_constraints(plan.constraints.clone());
            if space.events.is_empty() {
                continue;
            }

            let events = spaces_repo.update(&mut space).await?;
            self.state.events.dispatch_all(events).await;
            updated += 1;
        }

        Ok(updated)
    }

    pub async fn get(&self, plan_id: Uuid) -> Result<Option<Plan>, AppError> {
        self.plans().find_by_id(plan_id).await
    }

    pub async fn get_all(&self, page: u64, per_page: u64) -> Result<(Vec<Plan>, u64), AppError> {
        self.plans().get_all_paginated(page, per_page).await
    }

    /// Deletes a plan. Spaces keep their copied constraint set; their plan
    /// link is cleared by the schema's SET NULL.
    pub async fn remove(&self, plan_id: Uuid) -> Result<(), AppError> {
        let plans = self.plans();

        if plans.find_by_id(plan_id).await?.is_none() {
            return Err(AppError::NotFound("Plan not found".to_string()));
        }

        plans.remove(plan_id).await
    }
}
