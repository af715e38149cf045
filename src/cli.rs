//! Command-line interface definition for Sessmig
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for running the migration and for dry-run scans.

use clap::{Parser, Subcommand};

/// Sessmig - one-shot session cache migration
///
/// Moves live session records from a namespaced key-value cache into a
/// SQLite store. Safe to re-run after an interruption.
#[derive(Parser, Debug, Clone)]
#[command(name = "sessmig")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the source cache path from config
    #[arg(long)]
    pub cache: Option<String>,

    /// Override the destination database path from config
    #[arg(long)]
    pub dest: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Sessmig
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Migrate every session under the namespace prefix
    Migrate {
        /// Override the namespace prefix from config
        #[arg(short, long)]
        prefix: Option<String>,

        /// Emit the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Exit zero even when some keys failed to migrate
        #[arg(long)]
        allow_failures: bool,
    },

    /// Dry run: report what a migration would do without writing
    Scan {
        /// Override the namespace prefix from config
        #[arg(short, long)]
        prefix: Option<String>,

        /// Emit the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            cache: None,
            dest: None,
            command: Commands::Scan {
                prefix: None,
                json: false,
            },
        }
    }
}
