use super::*;
use crate::model::{
    constraint::{ConstraintKind, Constraints},
    space::Space,
};
use uuid::Uuid;

/// Tests that the polymorphic owner survives the column round trip.
///
/// Expected: user-owned and organization-owned spaces read back with the
/// same owner
#[tokio::test]
async fn owner_round_trips_through_columns() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::Plan)
        .with_table(entity::prelude::Space)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let organization = create_organization(db).await.unwrap();
    let repo = SpaceRepository::new(db);

    let mut user_space = Space::register_with_constraints(
        Uuid::new_v4(),
        Owner::User(user.id),
        Constraints::default(),
    );
    repo.insert(&mut user_space).await?;

    let mut org_space = Space::register_with_constraints(
        Uuid::new_v4(),
        Owner::Organization(organization.id),
        Constraints::default().with(ConstraintKind::MailboxCount, 10),
    );
    repo.insert(&mut org_space).await?;

    assert_eq!(
        repo.find_by_id(user_space.id).await?.unwrap().owner,
        Owner::User(user.id)
    );

    let found_org_space = repo.find_by_id(org_space.id).await?.unwrap();
    assert_eq!(found_org_space.owner, Owner::Organization(organization.id));
    assert_eq!(
        found_org_space.constraints.get(ConstraintKind::MailboxCount),
        Some(10)
    );

    Ok(())
}

/// Tests the owner-organization and plan lookups used by the removal
/// blocking check and the plan sync.
///
/// Expected: each query returns exactly the matching spaces
#[tokio::test]
async fn finds_spaces_by_organization_and_plan() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::Plan)
        .with_table(entity::prelude::Space)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let organization = create_organization(db).await.unwrap();
    let plan = create_plan(db).await.unwrap();

    let org_space = SpaceFactory::new(db)
        .owner_organization_id(organization.id)
        .plan_id(plan.id)
        .build()
        .await
        .unwrap();
    SpaceFactory::new(db)
        .owner_user_id(user.id)
        .build()
        .await
        .unwrap();

    let repo = SpaceRepository::new(db);

    let by_org = repo.find_by_owner_organization(organization.id).await?;
    assert_eq!(by_org.len(), 1);
    assert_eq!(by_org[0].id, org_space.id);

    let by_plan = repo.find_by_plan(plan.id).await?;
    assert_eq!(by_plan.len(), 1);
    assert_eq!(by_plan[0].id, org_space.id);

    Ok(())
}
