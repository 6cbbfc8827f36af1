use super::*;
use test_utils::factory::user::{create_admin, create_user};

/// Tests admin_exists across an empty and a seeded database.
///
/// Expected: false with only regular users, true once an admin exists
#[tokio::test]
async fn admin_exists_reflects_database() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db, &TestHashStrategy);

    assert!(!repo.admin_exists().await?);

    create_user(db).await.unwrap();
    assert!(!repo.admin_exists().await?);

    create_admin(db).await.unwrap();
    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests granting and revoking admin status.
///
/// Expected: the admin flag flips on the stored row
#[tokio::test]
async fn set_admin_updates_flag() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let repo = UserRepository::new(db, &TestHashStrategy);

    repo.set_admin(user.id, true).await?;
    assert!(repo.find_by_id(user.id).await?.unwrap().admin);

    repo.set_admin(user.id, false).await?;
    assert!(!repo.find_by_id(user.id).await?.unwrap().admin);

    Ok(())
}
