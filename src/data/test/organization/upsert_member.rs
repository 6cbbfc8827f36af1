use super::*;

/// Tests that adding the same member twice does not duplicate membership.
///
/// Expected: one membership row, keeping the original level when re-added
/// with it
#[tokio::test]
async fn does_not_duplicate_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::OrganizationMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organization = OrganizationFactory::new(db).build().await.unwrap();
    let user = create_user(db).await.unwrap();
    let repo = OrganizationRepository::new(db);

    for _ in 0..2 {
        repo.upsert_member(AddMemberParam {
            organization_id: organization.id,
            user_id: user.id,
            level: AccessLevel::Collaborator,
        })
        .await?;
    }

    let members = repo.get_members(organization.id).await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].level, AccessLevel::Collaborator);

    Ok(())
}

/// Tests that re-adding a member with a different level updates the level
/// in place (last-write-wins).
///
/// Expected: still one membership row, now at the new level
#[tokio::test]
async fn readding_updates_access_level() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::OrganizationMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organization = OrganizationFactory::new(db).build().await.unwrap();
    let user = create_user(db).await.unwrap();
    let repo = OrganizationRepository::new(db);

    repo.upsert_member(AddMemberParam {
        organization_id: organization.id,
        user_id: user.id,
        level: AccessLevel::Collaborator,
    })
    .await?;

    let updated = repo
        .upsert_member(AddMemberParam {
            organization_id: organization.id,
            user_id: user.id,
            level: AccessLevel::Manager,
        })
        .await?;
    assert_eq!(updated.level, AccessLevel::Manager);

    let members = repo.get_members(organization.id).await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].level, AccessLevel::Manager);

    Ok(())
}

/// Tests removing a member.
///
/// Expected: true on the first removal, false when the user is no longer a
/// member
#[tokio::test]
async fn removes_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Organization)
        .with_table(entity::prelude::OrganizationMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organization = OrganizationFactory::new(db).build().await.unwrap();
    let user = create_user(db).await.unwrap();
    let repo = OrganizationRepository::new(db);

    repo.upsert_member(AddMemberParam {
        organization_id: organization.id,
        user_id: user.id,
        level: AccessLevel::Manager,
    })
    .await?;

    assert!(repo.remove_member(organization.id, user.id).await?);
    assert!(!repo.remove_member(organization.id, user.id).await?);
    assert!(repo.get_members(organization.id).await?.is_empty());

    Ok(())
}
