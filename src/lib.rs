//! Sessmig - one-shot session cache migration
//!
//! This library moves active session records from a namespaced
//! key-value cache into a relational store that uses a different
//! internal representation for the same logical data. It is built to
//! run exactly once, without disrupting users with live sessions, and
//! to be safe to re-run if interrupted partway through.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: source and destination store capabilities (traits plus
//!   the sled and SQLite implementations)
//! - `migrate`: the pure transform, per-key outcomes, and the runner
//!   that orchestrates a whole migration
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use sessmig::migrate::MigrationRunner;
//! use sessmig::store::{SledCache, SqliteDestination};
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = SledCache::open("data/session_cache")?;
//!     let dest = SqliteDestination::new_with_path("data/sessions.db")?;
//!
//!     let runner = MigrationRunner::new(&source, &dest);
//!     let report = runner.run("session:")?;
//!     println!("migrated {} of {} sessions", report.migrated, report.total);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod migrate;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SessmigError};
pub use migrate::{MigrationOutcome, MigrationReport, MigrationRunner};
pub use store::{SessionKey, SessionRecord, SledCache, SqliteDestination};
