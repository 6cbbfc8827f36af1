//! Service layer.
//!
//! One service per aggregate orchestrating repositories, the capability
//! guard, the usage validators and the event bus. Controllers and the CLI
//! only ever talk to services, never to repositories directly.

pub mod capability;
pub mod domain_name;
pub mod domain_usage;
pub mod ftp_user;
pub mod mailbox;
pub mod organization;
pub mod plan;
pub mod public_suffix;
pub mod scheduled_task;
pub mod space;
pub mod sub_domain;
pub mod user;

#[cfg(test)]
mod test;
