//! Per-key outcomes and the aggregate migration report

use crate::store::types::SessionKey;
use serde::Serialize;

/// Result of processing a single source key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The record was transformed and inserted at the destination
    Migrated,
    /// The value vanished between enumeration and read (expired or
    /// invalidated session); nothing was written
    SkippedMissing,
    /// A record with this `session_id` already exists at the
    /// destination; the existing row was left untouched
    SkippedDuplicate,
    /// The key could not be migrated; carries the reason for the
    /// operator's failure list
    Failed(String),
}

/// A key that failed to migrate, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedKey {
    pub key: String,
    pub reason: String,
}

/// Aggregate result of one migration run
///
/// Created at run start, updated once per key, handed to the caller at
/// run end. Ephemeral: never persisted, owns no external resources.
/// The caller decides whether a non-empty failure list should abort a
/// larger deployment step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// Number of keys enumerated
    pub total: usize,
    /// Keys inserted at the destination
    pub migrated: usize,
    /// Keys whose value vanished before the read
    pub skipped_missing: usize,
    /// Keys already present at the destination
    pub skipped_duplicate: usize,
    /// Keys that failed, with reasons
    pub failed: Vec<FailedKey>,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one key. Called exactly once per key.
    pub fn record(&mut self, key: &SessionKey, outcome: MigrationOutcome) {
        match outcome {
            MigrationOutcome::Migrated => self.migrated += 1,
            MigrationOutcome::SkippedMissing => self.skipped_missing += 1,
            MigrationOutcome::SkippedDuplicate => self.skipped_duplicate += 1,
            MigrationOutcome::Failed(reason) => self.failed.push(FailedKey {
                key: key.as_str().to_string(),
                reason,
            }),
        }
    }

    /// Whether every key was handled without failure
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
