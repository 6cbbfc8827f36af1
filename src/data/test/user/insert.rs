use super::*;
use uuid::Uuid;

/// Tests persisting a registered user and reading it back by id.
///
/// Expected: Ok with identical identity fields and the registration event
/// drained on insert
#[tokio::test]
async fn persists_registered_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db, &TestHashStrategy);
    let id = Uuid::new_v4();
    let mut user = User::register(id, "Jane", "jane@example.com", "$argon2id$x", false);

    let events = repo.insert(&mut user).await?;

    assert_eq!(events.len(), 1);
    assert!(user.events.is_empty());

    let found = repo.find_by_id(id).await?.unwrap();
    assert_eq!(found.display_name, "Jane");
    assert_eq!(found.email, "jane@example.com");
    assert!(!found.admin);

    Ok(())
}

/// Tests that the blind-index uniqueness rejects a second user with the
/// same email address (case-insensitive).
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db, &TestHashStrategy);

    let mut first = User::register(Uuid::new_v4(), "Jane", "jane@example.com", "h", false);
    repo.insert(&mut first).await?;

    let mut second = User::register(Uuid::new_v4(), "Imposter", "JANE@example.com", "h", false);
    let result = repo.insert(&mut second).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that an update rewrites the email and its blind index.
///
/// Expected: lookup by the new address finds the user, the old address
/// finds nothing
#[tokio::test]
async fn update_rewrites_email_blind_index() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db, &TestHashStrategy);
    let mut user = User::register(Uuid::new_v4(), "Jane", "jane@example.com", "h", false);
    repo.insert(&mut user).await?;

    user.change_email("jane@rollerworks.example");
    repo.update(&mut user).await?;

    assert!(repo
        .find_by_email("jane@rollerworks.example")
        .await?
        .is_some());
    assert!(repo.find_by_email("jane@example.com").await?.is_none());

    Ok(())
}
