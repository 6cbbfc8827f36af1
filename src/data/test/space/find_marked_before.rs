use super::*;
use chrono::{Duration, Utc};

/// Tests the purge query for spaces marked for removal.
///
/// Expected: only spaces whose marking passed the cutoff are returned
#[tokio::test]
async fn returns_only_spaces_past_the_cutoff() -> Result<(), AppError> {
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

    let old = SpaceFactory::new(db)
        .owner_user_id(user.id)
        .marked_for_removal_at(Utc::now() - Duration::days(10))
        .build()
        .await
        .unwrap();
    SpaceFactory::new(db)
        .owner_user_id(user.id)
        .marked_for_removal_at(Utc::now() - Duration::days(1))
        .build()
        .await
        .unwrap();
    SpaceFactory::new(db)
        .owner_user_id(user.id)
        .build()
        .await
        .unwrap();

    let repo = SpaceRepository::new(db);
    let due = repo.find_marked_before(Utc::now() - Duration::days(7)).await?;

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, old.id);

    repo.delete(old.id).await?;
    assert!(repo.find_by_id(old.id).await?.is_none());

    Ok(())
}
