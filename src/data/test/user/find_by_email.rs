use super::*;
use test_utils::factory::user::UserFactory;

/// Tests lookup through the blind index with normalization.
///
/// Expected: Ok(Some) for any casing/whitespace of the address, Ok(None)
/// for unknown addresses
#[tokio::test]
async fn finds_user_by_normalized_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db)
        .email("jane@example.com")
        .build()
        .await
        .unwrap();

    let repo = UserRepository::new(db, &TestHashStrategy);

    assert!(repo.find_by_email("Jane@Example.COM").await?.is_some());
    assert!(repo.find_by_email("  jane@example.com ").await?.is_some());
    assert!(repo.find_by_email("john@example.com").await?.is_none());

    Ok(())
}
