//! Command-line interface for the flavor service.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flavor API - JSON CRUD service for ice cream flavors
#[derive(Debug, Parser)]
#[command(name = "flavor-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default search path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Write a default config.toml to the working directory
    Init,

    /// Load and validate the configuration, then exit
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
