use super::*;
use uuid::Uuid;

/// Tests the JSON round trip of a plan's constraint set.
///
/// Expected: the set read back equals the set written
#[tokio::test]
async fn constraints_round_trip_through_json_column() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Plan)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlanRepository::new(db);
    let constraints = Constraints::default()
        .with(ConstraintKind::MailboxCount, 25)
        .with(ConstraintKind::StorageQuota, 5 * 1024 * 1024 * 1024);
    let mut plan = Plan::create(Uuid::new_v4(), "Starter", constraints.clone());

    repo.insert(&mut plan).await?;

    let found = repo.find_by_id(plan.id).await?.unwrap();
    assert_eq!(found.label, "Starter");
    assert_eq!(found.constraints, constraints);

    Ok(())
}

/// Tests that changing constraints persists the new set and drains exactly
/// one event.
///
/// Expected: one event on change, the stored set replaced
#[tokio::test]
async fn update_persists_changed_constraints() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Plan)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlanRepository::new(db);
    let mut plan = Plan::create(
        Uuid::new_v4(),
        "Starter",
        Constraints::default().with(ConstraintKind::MailboxCount, 25),
    );
    repo.insert(&mut plan).await?;

    let next = Constraints::default().with(ConstraintKind::MailboxCount, 50);
    plan.change_constraints(next.clone());
    let events = repo.update(&mut plan).await?;

    assert_eq!(events.len(), 1);
    assert_eq!(repo.find_by_id(plan.id).await?.unwrap().constraints, next);

    Ok(())
}
