//! One-shot migration of session records from the cache to the
//! relational store
//!
//! The pipeline is short: enumerate keys under the namespace prefix,
//! read and decode each value, transform it into a canonical record,
//! and upsert it at the destination. `MigrationRunner` orchestrates the
//! whole thing and produces a `MigrationReport`.

pub mod report;
pub mod runner;
pub mod transform;

pub use report::{FailedKey, MigrationOutcome, MigrationReport};
pub use runner::MigrationRunner;
pub use transform::transform;
