//! Command-line interface.

pub mod register_administrator;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "park-manager", about = "Hosting-account administration panel")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default).
    Serve,
    /// Administrator management.
    Administrator {
        #[command(subcommand)]
        command: AdministratorCommands,
    },
}

#[derive(Subcommand)]
pub enum AdministratorCommands {
    /// Interactively register a new administrator account.
    Register,
}
