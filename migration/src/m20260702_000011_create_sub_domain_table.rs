use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260701_000006_create_space_table::Space,
    m20260702_000007_create_domain_name_table::DomainName,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubDomain::Table)
                    .if_not_exists()
                    .col(pk_uuid(SubDomain::Id))
                    .col(uuid(SubDomain::SpaceId))
                    .col(uuid(SubDomain::DomainNameId))
                    .col(string(SubDomain::Host))
                    .col(string_null(SubDomain::DocumentRoot))
                    .col(timestamp(SubDomain::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_domain_space_id")
                            .from(SubDomain::Table, SubDomain::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_domain_domain_name_id")
                            .from(SubDomain::Table, SubDomain::DomainNameId)
                            .to(DomainName::Table, DomainName::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sub_domain_domain_host")
                    .table(SubDomain::Table)
                    .col(SubDomain::DomainNameId)
                    .col(SubDomain::Host)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubDomain::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SubDomain {
    Table,
    Id,
    SpaceId,
    DomainNameId,
    Host,
    DocumentRoot,
    CreatedAt,
}
