use super::*;
use chrono::Utc;

/// Tests the scheduler's enabled-task query and the last-run stamp.
///
/// Expected: disabled tasks are excluded; set_last_run persists
#[tokio::test]
async fn returns_enabled_tasks_and_stamps_runs() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::Plan)
        .with_table(entity::prelude::Space)
        .with_table(entity::prelude::ScheduledTask)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    let enabled = ScheduledTaskFactory::new(db)
        .space_id(space.id)
        .schedule("*/5 * * * *")
        .build()
        .await
        .unwrap();
    ScheduledTaskFactory::new(db)
        .space_id(space.id)
        .enabled(false)
        .build()
        .await
        .unwrap();

    let repo = ScheduledTaskRepository::new(db);

    let tasks = repo.find_enabled().await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, enabled.id);
    assert!(tasks[0].last_run_at.is_none());

    let now = Utc::now();
    repo.set_last_run(enabled.id, now).await?;

    let stamped = repo.find_by_id(enabled.id).await?.unwrap();
    assert!(stamped.last_run_at.is_some());

    Ok(())
}
