//! Entity factories with sensible defaults for tests.

pub mod domain_name;
pub mod ftp_user;
pub mod helpers;
pub mod mailbox;
pub mod organization;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod user;
