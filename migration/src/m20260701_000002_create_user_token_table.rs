use sea_orm_migration::{prelude::*, schema::*};

use super::m20260701_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserToken::Table)
                    .if_not_exists()
                    .col(pk_uuid(UserToken::Id))
                    .col(uuid(UserToken::UserId))
                    .col(string(UserToken::Kind))
                    .col(string_uniq(UserToken::Selector))
                    .col(string(UserToken::VerifierHash))
                    .col(string_null(UserToken::Payload))
                    .col(timestamp(UserToken::ExpiresAt))
                    .col(timestamp(UserToken::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_token_user_id")
                            .from(UserToken::Table, UserToken::UserId)
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
            .drop_table(Table::drop().table(UserToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserToken {
    Table,
    Id,
    UserId,
    Kind,
    Selector,
    VerifierHash,
    Payload,
    ExpiresAt,
    CreatedAt,
}
