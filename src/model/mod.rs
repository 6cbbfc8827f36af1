//! Domain models and operation-specific parameter types.

pub mod constraint;
pub mod domain_name;
pub mod event;
pub mod ftp_user;
pub mod mailbox;
pub mod organization;
pub mod owner;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;
