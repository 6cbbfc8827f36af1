//! Request/response DTOs for the JSON API.

pub mod api;
pub mod auth;
pub mod domain_name;
pub mod ftp_user;
pub mod mailbox;
pub mod organization;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;
