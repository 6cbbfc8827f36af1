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
                    .table(MailForward::Table)
                    .if_not_exists()
                    .col(pk_uuid(MailForward::Id))
                    .col(uuid(MailForward::SpaceId))
                    .col(uuid(MailForward::DomainNameId))
                    .col(string(MailForward::Address))
                    .col(string(MailForward::Destination))
                    .col(timestamp(MailForward::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mail_forward_space_id")
                            .from(MailForward::Table, MailForward::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mail_forward_domain_name_id")
                            .from(MailForward::Table, MailForward::DomainNameId)
                            .to(DomainName::Table, DomainName::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mail_forward_domain_address")
                    .table(MailForward::Table)
                    .col(MailForward::DomainNameId)
                    .col(MailForward::Address)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MailForward::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MailForward {
    Table,
    Id,
    SpaceId,
    DomainNameId,
    Address,
    Destination,
    CreatedAt,
}
