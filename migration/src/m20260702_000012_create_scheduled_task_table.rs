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
                    .table(ScheduledTask::Table)
                    .if_not_exists()
                    .col(pk_uuid(ScheduledTask::Id))
                    .col(uuid(ScheduledTask::SpaceId))
                    .col(string(ScheduledTask::Schedule))
                    .col(string(ScheduledTask::Command))
                    .col(boolean(ScheduledTask::Enabled).default(true))
                    .col(timestamp_null(ScheduledTask::LastRunAt))
                    .col(timestamp(ScheduledTask::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ScheduledTask::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_task_space_id")
                            .from(ScheduledTask::Table, ScheduledTask::SpaceId)
                            .to(Space::Table, Space::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledTask::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduledTask {
    Table,
    Id,
    SpaceId,
    Schedule,
    Command,
    Enabled,
    LastRunAt,
    CreatedAt,
    UpdatedAt,
}
