//! Sessmig - one-shot session cache migration CLI
//!
#![doc = "Main entry point for the sessmig binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sessmig::cli::{Cli, Commands};
use sessmig::commands;
use sessmig::config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Migrate {
            prefix,
            json,
            allow_failures,
        } => {
            tracing::info!("Starting session migration");
            if let Some(p) = &prefix {
                tracing::debug!("Using prefix override: {}", p);
            }
            if allow_failures {
                tracing::warn!("Per-key failures will not fail the command");
            }

            commands::migrate::run_migrate(config, prefix, json, allow_failures)?;
            Ok(())
        }
        Commands::Scan { prefix, json } => {
            tracing::info!("Starting dry-run scan");
            commands::scan::run_scan(config, prefix, json)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sessmig=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
