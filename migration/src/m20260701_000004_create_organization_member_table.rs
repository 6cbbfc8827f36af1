use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260701_000001_create_user_table::User,
    m20260701_000003_create_organization_table::Organization,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizationMember::Table)
                    .if_not_exists()
                    .col(uuid(OrganizationMember::OrganizationId))
                    .col(uuid(OrganizationMember::UserId))
                    .col(string(OrganizationMember::Level))
                    .col(timestamp(OrganizationMember::AddedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(OrganizationMember::OrganizationId)
                            .col(OrganizationMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_member_organization_id")
                            .from(
                                OrganizationMember::Table,
                                OrganizationMember::OrganizationId,
                            )
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_member_user_id")
                            .from(OrganizationMember::Table, OrganizationMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrganizationMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OrganizationMember {
    Table,
    OrganizationId,
    UserId,
    Level,
    AddedAt,
}
