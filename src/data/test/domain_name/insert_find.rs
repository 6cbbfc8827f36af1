use super::*;
use crate::model::domain_name::DomainName;

/// Tests name/TLD lookup and the per-space primary lookup.
///
/// Expected: lookups find the matching rows only
#[tokio::test]
async fn finds_by_name_tld_and_primary() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::Plan)
        .with_table(entity::prelude::Space)
        .with_table(entity::prelude::DomainName)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    let primary = DomainNameFactory::new(db)
        .name("rollerworks")
        .tld("net")
        .space_id(space.id)
        .primary(true)
        .build()
        .await
        .unwrap();
    DomainNameFactory::new(db)
        .name("rollerworks")
        .tld("com")
        .space_id(space.id)
        .build()
        .await
        .unwrap();

    let repo = DomainNameRepository::new(db);

    let found = repo.find_by_name_and_tld("rollerworks", "net").await?.unwrap();
    assert_eq!(found.id, primary.id);
    assert_eq!(found.fqdn(), "rollerworks.net");
    assert!(repo.find_by_name_and_tld("rollerworks", "org").await?.is_none());

    let found_primary = repo.find_primary_of_space(space.id).await?.unwrap();
    assert_eq!(found_primary.id, primary.id);

    assert_eq!(repo.find_by_space(space.id).await?.len(), 2);
    assert_eq!(repo.find_by_spaces(&[space.id]).await?.len(), 2);
    assert!(repo.find_by_spaces(&[]).await?.is_empty());

    Ok(())
}

/// Tests that an update persists a primary swap.
///
/// Expected: the swapped flags are visible on re-read
#[tokio::test]
async fn update_persists_primary_swap() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::Plan)
        .with_table(entity::prelude::Space)
        .with_table(entity::prelude::DomainName)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();
    let entity = DomainNameFactory::new(db)
        .space_id(space.id)
        .build()
        .await
        .unwrap();

    let repo = DomainNameRepository::new(db);
    let mut domain_name = DomainName::from_entity(entity);

    domain_name.mark_primary().unwrap();
    repo.update(&mut domain_name).await?;

    assert!(repo
        .find_by_id(domain_name.id)
        .await?
        .unwrap()
        .is_primary);

    Ok(())
}
