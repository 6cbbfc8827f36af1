pub use sea_orm_migration::prelude::*;

mod m20260701_000001_create_user_table;
mod m20260701_000002_create_user_token_table;
mod m20260701_000003_create_organization_table;
mod m20260701_000004_create_organization_member_table;
mod m20260701_000005_create_plan_table;
mod m20260701_000006_create_space_table;
mod m20260702_000007_create_domain_name_table;
mod m20260702_000008_create_ftp_user_table;
mod m20260702_000009_create_mailbox_table;
mod m20260702_000010_create_mail_forward_table;
mod m20260702_000011_create_sub_domain_table;
mod m20260702_000012_create_scheduled_task_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_000001_create_user_table::Migration),
            Box::new(m20260701_000002_create_user_token_table::Migration),
            Box::new(m20260701_000003_create_organization_table::Migration),
            Box::new(m20260701_000004_create_organization_member_table::Migration),
            Box::new(m20260701_000005_create_plan_table::Migration),
            Box::new(m20260701_000006_create_space_table::Migration),
            Box::new(m20260702_000007_create_domain_name_table::Migration),
            Box::new(m20260702_000008_create_ftp_user_table::Migration),
            Box::new(m20260702_000009_create_mailbox_table::Migration),
            Box::new(m20260702_000010_create_mail_forward_table::Migration),
            Box::new(m20260702_000011_create_sub_domain_table::Migration),
            Box::new(m20260702_000012_create_scheduled_task_table::Migration),
        ]
    }
}
