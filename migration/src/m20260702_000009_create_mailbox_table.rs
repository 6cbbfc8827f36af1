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
                    .table(Mailbox::Table)
                    .if_not_exists()
                    .col(pk_uuid(Mailbox::Id))
                    .col(uuid(Mailbox::SpaceId))
                    .col(uuid(Mailbox::DomainNameId))
                    .col(string(Mailbox::Address))
                    .col(big_integer(Mailbox::SizeQuota))
                    .col(string(Mailbox::PasswordHash))
                    .col(timestamp(Mailbox::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mailbox_space_id")
                            .from(Mailbox::Table, Mailbox::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mailbox_domain_name_id")
                            .from(Mailbox::Table, Mailbox::DomainNameId)
                            .to(DomainName::Table, DomainName::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mailbox_domain_address")
                    .table(Mailbox::Table)
                    .col(Mailbox::DomainNameId)
                    .col(Mailbox::Address)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mailbox::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Mailbox {
    Table,
    Id,
    SpaceId,
    DomainNameId,
    Address,
    SizeQuota,
    PasswordHash,
    CreatedAt,
}
