use sea_orm_migration::{prelude::*, schema::*};

use super::m20260701_000006_create_space_table::Space;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DomainName::Table)
                    .if_not_exists()
                    .col(pk_uuid(DomainName::Id))
                    .col(string(DomainName::Name))
                    .col(string(DomainName::Tld))
                    .col(uuid_null(DomainName::SpaceId))
                    .col(boolean(DomainName::IsPrimary).default(false))
                    .col(timestamp(DomainName::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(DomainName::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_domain_name_space_id")
                            .from(DomainName::Table, DomainName::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_domain_name_name_tld")
                    .table(DomainName::Table)
                    .col(DomainName::Name)
                    .col(DomainName::Tld)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DomainName::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DomainName {
    Table,
    Id,
    Name,
    Tld,
    SpaceId,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}
