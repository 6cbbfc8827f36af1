use test_utils::builder::TestBuilder;
use test_utils::factory::{
    mailbox::MailboxFactory, space::create_space_for_user, user::create_user,
};
use uuid::Uuid;

use crate::{
    error::{domain::DomainError, AppError},
    service::{domain_name::DomainNameService, test::test_state},
};

/// Registration splits the FQDN on the public-suffix list; the first domain
/// name of a space becomes primary, later ones do not.
#[tokio::test]
async fn registers_and_assigns_with_primary_bootstrap() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = DomainNameService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    let first = service
        .register("example.co.uk", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();
    assert_eq!(first.name, "example");
    assert_eq!(first.tld, "co.uk");
    assert!(first.is_primary);

    let second = service
        .register("example.com", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();
    assert!(!second.is_primary);
}

/// An unknown suffix and a duplicate registration are both rejected.
#[tokio::test]
async fn rejects_unknown_suffix_and_duplicates() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = DomainNameService::new(&state);

    let err = service
        .register("example.notatld", Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::UnknownPublicSuffix { .. })
    ));

    service
        .register("example.com", Uuid::new_v4(), None)
        .await
        .unwrap();
    let err = service
        .register("Example.COM", Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::DomainNameAlreadyRegistered { .. })
    ));
}

/// A primary domain name can be neither transferred nor removed; the typed
/// errors carry the domain-name and space ids.
#[tokio::test]
async fn primary_domain_name_is_pinned_to_its_space() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = DomainNameService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();
    let other_space = create_space_for_user(db, user.id).await.unwrap();

    let primary = service
        .register("example.com", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();

    let err = service.transfer(primary.id, other_space.id).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::CannotTransferPrimaryDomainName {
            domain_name_id,
            space_id,
        }) if domain_name_id == primary.id && space_id == space.id
    ));

    let err = service.remove(primary.id).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::CannotRemovePrimaryDomainName {
            domain_name_id,
            space_id,
        }) if domain_name_id == primary.id && space_id == space.id
    ));
}

/// Marking another domain name primary swaps the flag off the previous one,
/// which then becomes transferable.
#[tokio::test]
async fn mark_primary_swaps_and_unblocks_transfer() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = DomainNameService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();
    let other_space = create_space_for_user(db, user.id).await.unwrap();

    let first = service
        .register("example.com", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();
    let second = service
        .register("example.net", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();

    let second = service.mark_primary(second.id).await.unwrap();
    assert!(second.is_primary);

    let first = service.get(first.id).await.unwrap().unwrap();
    assert!(!first.is_primary);

    let transferred = service.transfer(first.id, other_space.id).await.unwrap();
    assert_eq!(transferred.space_id, Some(other_space.id));
}

/// A non-primary domain name with dependent entities cannot be removed; the
/// error lists them.
#[tokio::test]
async fn removal_is_blocked_by_usages() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = DomainNameService::new(&state);

    let user = create_user(db).await.unwrap();
    let space = create_space_for_user(db, user.id).await.unwrap();

    service
        .register("example.com", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();
    let secondary = service
        .register("example.net", Uuid::new_v4(), Some(space.id))
        .await
        .unwrap();

    MailboxFactory::new(db)
        .space_id(space.id)
        .domain_name_id(secondary.id)
        .address("info")
        .build()
        .await
        .unwrap();

    let err = service.remove(secondary.id).await.unwrap_err();
    match err {
        AppError::DomainErr(DomainError::CannotRemoveInUseDomainName { usages, .. }) => {
            assert_eq!(usages.len(), 1);
            assert_eq!(usages[0].kind, "mailbox");
            assert_eq!(usages[0].label, "info");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Unused after the mailbox is gone conceptually: removal of an
    // unassigned registration stays possible.
    let unassigned = service
        .register("example.org", Uuid::new_v4(), None)
        .await
        .unwrap();
    service.remove(unassigned.id).await.unwrap();
}
