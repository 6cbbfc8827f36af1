use super::*;

/// Tests locating the reserved internal organization.
///
/// Expected: Ok(None) before seeding, Ok(Some) with the internal flag after
#[tokio::test]
async fn finds_internal_organization() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Organization)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OrganizationRepository::new(db);
    assert!(repo.find_internal().await?.is_none());

    OrganizationFactory::new(db).build().await.unwrap();
    let internal = OrganizationFactory::new(db)
        .name("Administrators")
        .internal(true)
        .build()
        .await
        .unwrap();

    let found = repo.find_internal().await?.unwrap();
    assert_eq!(found.id, internal.id);
    assert!(found.internal);

    Ok(())
}
