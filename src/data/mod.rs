//! Data access layer.
//!
//! One repository per aggregate. Repositories convert entity models to domain
//! models at the boundary, and drain the domain events an aggregate recorded
//! when saving it; the calling service dispatches the drained events on the
//! event bus after the persistence call succeeded.

pub mod domain_name;
pub mod ftp_user;
pub mod mailbox;
pub mod organization;
pub mod plan;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;
pub mod user_token;

#[cfg(test)]
mod test;
