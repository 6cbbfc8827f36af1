use test_utils::builder::TestBuilder;
use test_utils::factory::user::UserFactory;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
    util::hash::TestHashStrategy,
};

/// Tests that an empty session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_request_without_session_user() {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, &TestHashStrategy, session)
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));
}

/// Tests that a logged-in user is resolved from the session.
///
/// Expected: Ok with the stored user's identity
#[tokio::test]
async fn resolves_session_user() {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = UserFactory::new(db)
        .display_name("Jane")
        .build()
        .await
        .unwrap();
    AuthSession::new(session).set_user_id(user.id).await.unwrap();

    let resolved = AuthGuard::new(db, &TestHashStrategy, session)
        .require(&[])
        .await
        .unwrap();

    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.display_name, "Jane");
}

/// Tests that the admin permission blocks regular users.
///
/// Expected: Err(AuthError::AccessDenied) for non-admins, Ok for admins
#[tokio::test]
async fn admin_permission_requires_admin_flag() {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = UserFactory::new(db).admin(false).build().await.unwrap();
    AuthSession::new(session).set_user_id(user.id).await.unwrap();

    let result = AuthGuard::new(db, &TestHashStrategy, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
}
