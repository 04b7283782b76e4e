//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::check::CheckArgs;

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "confbind")]
#[command(about = "Bind configuration from environment variables and a secrets store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to .confbind/config.yaml)
    #[arg(short, long, global = true, env = "CONFBIND_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dry-run a bind of the sample service configuration
    Check(CheckArgs),

    /// Print the effective settings
    ShowSettings,
}
