use test_utils::builder::TestBuilder;
use test_utils::factory::{
    domain_name::DomainNameFactory, organization::OrganizationFactory,
    space::create_space_for_organization,
};
use uuid::Uuid;

use crate::{
    error::{domain::DomainError, AppError},
    model::organization::CreateOrganizationParam,
    service::{organization::OrganizationService, test::test_state},
};

/// An organization without assigned resources is removed cleanly.
#[tokio::test]
async fn removes_unused_organization() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = OrganizationService::new(&state);

    let organization = service
        .create(CreateOrganizationParam {
            id: Uuid::new_v4(),
            name: "Testing Inc.".to_string(),
            internal: false,
        })
        .await
        .unwrap();

    service.remove(organization.id).await.unwrap();

    assert!(service.get(organization.id).await.unwrap().is_none());
}

/// An organization owning one space and one domain name fails removal with
/// both entity types listed in the error payload.
#[tokio::test]
async fn blocks_removal_of_active_organization() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = OrganizationService::new(&state);

    let organization = OrganizationFactory::new(db)
        .name("Rollerworks")
        .build()
        .await
        .unwrap();
    let space = create_space_for_organization(db, organization.id).await.unwrap();
    DomainNameFactory::new(db)
        .name("rollerworks")
        .tld("net")
        .space_id(space.id)
        .primary(true)
        .build()
        .await
        .unwrap();

    let err = service.remove(organization.id).await.unwrap_err();

    match err {
        AppError::DomainErr(DomainError::CannotRemoveActiveOrganization {
            organization_id,
            blocking,
        }) => {
            assert_eq!(organization_id, organization.id);
            let mut kinds: Vec<_> = blocking.iter().map(|b| b.kind.clone()).collect();
            kinds.sort();
            assert_eq!(kinds, vec!["domain_name", "space"]);
            assert!(blocking.iter().any(|b| b.label == "rollerworks.net"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Still there.
    assert!(service.get(organization.id).await.unwrap().is_some());
}

/// The reserved internal organization is never removable, even without any
/// assigned resources.
#[tokio::test]
async fn blocks_removal_of_internal_organization() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = OrganizationService::new(&state);

    let internal = OrganizationFactory::new(db)
        .name("Administrators")
        .internal(true)
        .build()
        .await
        .unwrap();

    let err = service.remove(internal.id).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::DomainErr(DomainError::CannotRemoveInternalOrganization { organization_id })
            if organization_id == internal.id
    ));
}

/// Seeding the internal organization is idempotent.
#[tokio::test]
async fn ensure_internal_organization_is_idempotent() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = test_state(db);
    let service = OrganizationService::new(&state);

    let first = service.ensure_internal_organization().await.unwrap();
    let second = service.ensure_internal_organization().await.unwrap();

    assert_eq!(first.id, second.id);
    assert!(first.internal);
}
