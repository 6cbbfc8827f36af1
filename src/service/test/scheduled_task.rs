use chrono::{TimeZone, Utc};
use test_utils::builder::TestBuilder;
use test_utils::factory::{
    scheduled_task::ScheduledTaskFactory, space::create_space_for_user, user::create_user,
};
use uuid::Uuid;

use crate::{
    error::{domain::DomainError, AppError},
    model::scheduled_task::RegisterScheduledTaskParam,
    service::{scheduled_task::ScheduledTaskService, test::test_state},
};

/// Registration validates the cron expression.
#[tokio::test]
async fn rejects_invalid_cron_expression() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = ScheduledTaskService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    let err = service
        .register(RegisterScheduledTaskParam {
            id: Uuid::new_v4(),
            space_id: space.id,
            schedule: "every day at noon".to_string(),
            command: "/usr/local/bin/backup".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::InvalidCronExpression { .. })
    ));
}

/// The runner executes exactly the enabled tasks whose expression matches
/// the tick minute, and stamps their last run.
#[tokio::test]
async fn runs_only_matching_enabled_tasks() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = ScheduledTaskService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    let due = ScheduledTaskFactory::new(db)
        .space_id(space.id)
        .schedule("30 4 * * *")
        .build()
        .await
        .unwrap();
    ScheduledTaskFactory::new(db)
        .space_id(space.id)
        .schedule("0 12 * * *")
        .build()
        .await
        .unwrap();
    ScheduledTaskFactory::new(db)
        .space_id(space.id)
        .schedule("30 4 * * *")
        .enabled(false)
        .build()
        .await
        .unwrap();

    let tick = Utc.with_ymd_and_hms(2026, 7, 1, 4, 30, 0).unwrap();
    assert_eq!(service.run_due(tick).await.unwrap(), 1);

    let stamped = service.get(due.id).await.unwrap().unwrap();
    assert_eq!(stamped.last_run_at, Some(tick));

    // A second tick in the same minute does not run the task again.
    assert_eq!(service.run_due(tick).await.unwrap(), 0);
}
