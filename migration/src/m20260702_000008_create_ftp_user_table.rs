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
                    .table(FtpUser::Table)
                    .if_not_exists()
                    .col(pk_uuid(FtpUser::Id))
                    .col(uuid(FtpUser::SpaceId))
                    .col(uuid(FtpUser::DomainNameId))
                    .col(string(FtpUser::Username))
                    .col(string(FtpUser::PasswordHash))
                    .col(timestamp(FtpUser::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ftp_user_space_id")
                            .from(FtpUser::Table, FtpUser::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ftp_user_domain_name_id")
                            .from(FtpUser::Table, FtpUser::DomainNameId)
                            .to(DomainName::Table, DomainName::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ftp_user_domain_username")
                    .table(FtpUser::Table)
                    .col(FtpUser::DomainNameId)
                    .col(FtpUser::Username)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FtpUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FtpUser {
    Table,
    Id,
    SpaceId,
    DomainNameId,
    Username,
    PasswordHash,
    CreatedAt,
}
