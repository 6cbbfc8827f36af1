use test_utils::builder::TestBuilder;
use uuid::Uuid;

use crate::{
    error::{auth::AuthError, domain::DomainError, AppError},
    model::user::RegisterUserParam,
    service::{test::test_state, user::UserService},
};

fn register_param(email: &str, admin: bool) -> RegisterUserParam {
    RegisterUserParam {
        id: Uuid::new_v4(),
        display_name: "Jane".to_string(),
        email: email.to_string(),
        password: "s3cret-password".to_string(),
        admin,
    }
}

/// Registering an administrator with a fresh email persists the given id,
/// email, display name, and a verifiable password hash.
#[tokio::test]
async fn registers_administrator_with_given_identity() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = UserService::new(&state);

    let param = register_param("admin@example.com", true);
    let expected_id = param.id;

    let user = service.register(param).await.unwrap();

    assert_eq!(user.id, expected_id);
    assert!(user.admin);

    let stored = service.get_user(expected_id).await.unwrap().unwrap();
    assert_eq!(stored.email, "admin@example.com");
    assert_eq!(stored.display_name, "Jane");
    assert!(crate::util::password::verify_password("s3cret-password", &stored.password_hash)
        .unwrap());
}

/// Registering with an email already in use fails with
/// `EmailAddressAlreadyInUse` carrying the existing user's id.
#[tokio::test]
async fn rejects_registration_with_used_email() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = UserService::new(&state);

    let existing = service
        .register(register_param("admin@example.com", true))
        .await
        .unwrap();

    let err = service
        .register(register_param("admin@example.com", false))
        .await
        .unwrap_err();

    match err {
        AppError::DomainErr(DomainError::EmailAddressAlreadyInUse { email, user_id }) => {
            assert_eq!(email, "admin@example.com");
            assert_eq!(user_id, existing.id);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Login succeeds with the right password and fails indistinguishably for
/// a wrong password or an unknown email.
#[tokio::test]
async fn login_verifies_credentials() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = UserService::new(&state);

    service
        .register(register_param("jane@example.com", false))
        .await
        .unwrap();

    let user = service
        .login("jane@example.com", "s3cret-password")
        .await
        .unwrap();
    assert_eq!(user.email, "jane@example.com");

    for (email, password) in [
        ("jane@example.com", "wrong"),
        ("nobody@example.com", "s3cret-password"),
    ] {
        let err = service.login(email, password).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::AuthErr(AuthError::InvalidCredentials)
        ));
    }
}

/// The full password-reset flow: request mails a token, confirming it with
/// a new password changes the login credentials and consumes the token.
#[tokio::test]
async fn password_reset_flow() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, mailer) = test_state(db);
    let service = UserService::new(&state);

    service
        .register(register_param("jane@example.com", false))
        .await
        .unwrap();

    service
        .request_password_reset("jane@example.com")
        .await
        .unwrap();

    let token = {
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        extract_token(&sent[0].body, "/password-reset/confirm/")
    };

    service
        .confirm_password_reset(&token, "new-password")
        .await
        .unwrap();

    service.login("jane@example.com", "new-password").await.unwrap();
    assert!(service
        .login("jane@example.com", "s3cret-password")
        .await
        .is_err());

    // The token is single-use.
    assert!(service
        .confirm_password_reset(&token, "another-password")
        .await
        .is_err());
}

/// Requesting a reset for an unknown email reports success and mails
/// nothing.
#[tokio::test]
async fn password_reset_for_unknown_email_is_silent() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, mailer) = test_state(db);

    UserService::new(&state)
        .request_password_reset("nobody@example.com")
        .await
        .unwrap();

    assert!(mailer.sent.lock().unwrap().is_empty());
}

/// The email-change flow: the confirmation token goes to the new address
/// and confirming applies the change.
#[tokio::test]
async fn email_change_flow() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, mailer) = test_state(db);
    let service = UserService::new(&state);

    let user = service
        .register(register_param("jane@example.com", false))
        .await
        .unwrap();

    service
        .request_email_change(user.id, "jane@rollerworks.example")
        .await
        .unwrap();

    let token = {
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@rollerworks.example");
        extract_token(&sent[0].body, "/confirm-email-address-change/")
    };

    let updated = service.confirm_email_change(&token).await.unwrap();
    assert_eq!(updated.email, "jane@rollerworks.example");

    // The old address no longer resolves.
    assert!(service
        .login("jane@example.com", "s3cret-password")
        .await
        .is_err());
    service
        .login("jane@rollerworks.example", "s3cret-password")
        .await
        .unwrap();
}

/// Pulls the raw token out of a mailed link.
fn extract_token(body: &str, marker: &str) -> String {
    let start = body.find(marker).expect("mail carries the token link") + marker.len();
    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}
