//! SeaORM entity definitions for the Park-Manager schema.

pub mod prelude;

pub mod domain_name;
pub mod ftp_user;
pub mod mail_forward;
pub mod mailbox;
pub mod organization;
pub mod organization_member;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;
pub mod user_token;
