use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260701_000001_create_user_table::User,
    m20260701_000003_create_organization_table::Organization,
    m20260701_000005_create_plan_table::Plan,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Space::Table)
                    .if_not_exists()
                    .col(pk_uuid(Space::Id))
                    .col(uuid_null(Space::OwnerUserId))
                    .col(uuid_null(Space::OwnerOrganizationId))
                    .col(uuid_null(Space::PlanId))
                    .col(json(Space::Constraints))
                    .col(timestamp_null(Space::MarkedForRemovalAt))
                    .col(timestamp(Space::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Space::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_space_owner_user_id")
                            .from(Space::Table, Space::OwnerUserId)
                            .to(User::Table, User::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_space_owner_organization_id")
                            .from(Space::Table, Space::OwnerOrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_space_plan_id")
                            .from(Space::Table, Space::PlanId)
                            .to(Plan::Table, Plan::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Space::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Space {
    Table,
    Id,
    OwnerUserId,
    OwnerOrganizationId,
    PlanId,
    Constraints,
    MarkedForRemovalAt,
    CreatedAt,
    UpdatedAt,
}
