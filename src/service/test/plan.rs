use test_utils::builder::TestBuilder;
use test_utils::factory::{
    plan::PlanFactory, space::SpaceFactory, user::create_user,
};
use uuid::Uuid;

use crate::{
    model::constraint::{ConstraintKind, Constraints},
    model::plan::CreatePlanParam,
    service::{plan::PlanService, test::test_state},
};

/// Syncing a plan pushes its constraints to linked spaces and reports how
/// many actually changed; an immediate second sync changes nothing.
#[tokio::test]
async fn sync_updates_only_divergent_spaces() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = PlanService::new(&state);

    let constraints = Constraints::default().with(ConstraintKind::MailboxCount, 25);
    let plan = PlanFactory::new(db)
        .constraints(constraints.to_json())
        .build()
        .await
        .unwrap();

    let user = create_user(db).await.unwrap();
    // One space already in sync, one diverged, one on no plan at all.
    SpaceFactory::new(db)
        .owner_user_id(user.id)
        .plan_id(plan.id)
        .constraints(constraints.to_json())
        .build()
        .await
        .unwrap();
    let diverged = SpaceFactory::new(db)
        .owner_user_id(user.id)
        .plan_id(plan.id)
        .constraints(serde_json::json!({ "mailbox_count": 5 }))
        .build()
        .await
        .unwrap();
    SpaceFactory::new(db)
        .owner_user_id(user.id)
        .build()
        .await
        .unwrap();

    assert_eq!(service.sync_to_spaces(plan.id).await.unwrap(), 1);
    assert_eq!(service.sync_to_spaces(plan.id).await.unwrap(), 0);

    let space = crate::data::space::SpaceRepository::new(db)
        .find_by_id(diverged.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(space.constraints, constraints);
}

/// Changing constraints to an equal set leaves the plan untouched; a
/// different set is persisted.
#[tokio::test]
async fn change_constraints_is_a_noop_for_equal_sets() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = PlanService::new(&state);

    let constraints = Constraints::default().with(ConstraintKind::FtpUserCount, 3);
    let plan = service
        .create(CreatePlanParam {
            id: Uuid::new_v4(),
            label: "Starter".to_string(),
            constraints: constraints.clone(),
        })
        .await
        .unwrap();

    let unchanged = service
        .change_constraints(plan.id, constraints.clone())
        .await
        .unwrap();
    assert_eq!(unchanged.constraints, constraints);

    let next = constraints.clone().with(ConstraintKind::FtpUserCount, 6);
    let changed = service.change_constraints(plan.id, next.clone()).await.unwrap();
    assert_eq!(changed.constraints, next);
}
