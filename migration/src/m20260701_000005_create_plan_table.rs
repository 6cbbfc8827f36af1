use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plan::Table)
                    .if_not_exists()
                    .col(pk_uuid(Plan::Id))
                    .col(string(Plan::Label))
                    .col(json(Plan::Constraints))
                    .col(timestamp(Plan::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Plan::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Plan {
    Table,
    Id,
    Label,
    Constraints,
    CreatedAt,
    UpdatedAt,
}
