//! Configuration management for Sessmig
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SessmigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Sessmig
///
/// Holds everything a migration run needs: where the source cache
/// lives, which namespace to migrate, and where the destination
/// database goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source cache configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Destination store configuration
    #[serde(default)]
    pub destination: DestinationConfig,
}

/// Source cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the sled cache database directory
    #[serde(default = "default_cache_path")]
    pub cache_path: String,

    /// Namespace prefix that scopes session keys within the cache
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_cache_path() -> String {
    "data/session_cache".to_string()
}

fn default_prefix() -> String {
    "session:".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            prefix: default_prefix(),
        }
    }
}

/// Destination store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Path to the SQLite database file.
    ///
    /// When unset, the database lands in the user's data directory
    /// (or wherever `SESSMIG_DEST_DB` points).
    #[serde(default)]
    pub db_path: Option<String>,
}

impl Config {
    /// Load configuration with the following precedence:
    /// 1. Configuration file (YAML)
    /// 2. Environment variables
    /// 3. CLI arguments (highest priority)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SessmigError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SessmigError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(cache_path) = std::env::var("SESSMIG_CACHE_PATH") {
            tracing::debug!(cache_path = %cache_path, "Env override: SESSMIG_CACHE_PATH");
            self.source.cache_path = cache_path;
        }

        if let Ok(prefix) = std::env::var("SESSMIG_PREFIX") {
            tracing::debug!(prefix = %prefix, "Env override: SESSMIG_PREFIX");
            self.source.prefix = prefix;
        }

        if let Ok(db_path) = std::env::var("SESSMIG_DEST_DB") {
            tracing::debug!(db_path = %db_path, "Env override: SESSMIG_DEST_DB");
            self.destination.db_path = Some(db_path);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(cache_path) = &cli.cache {
            self.source.cache_path = cache_path.clone();
        }

        if let Some(db_path) = &cli.dest {
            self.destination.db_path = Some(db_path.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.source.cache_path.is_empty() {
            return Err(SessmigError::Config("cache_path cannot be empty".to_string()).into());
        }

        if self.source.prefix.is_empty() {
            return Err(SessmigError::Config(
                "namespace prefix cannot be empty: an unscoped scan would sweep \
                 every key in the cache"
                    .to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            destination: DestinationConfig::default(),
        }
    }
}
