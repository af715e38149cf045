//! Migration orchestration
//!
//! Walks every key under the namespace prefix and runs the per-key
//! read -> transform -> upsert sequence, collecting one outcome per key.
//! Each key is an independently-failing unit of work: a cache of N
//! sessions with a handful of corrupt records still migrates the rest,
//! and the operator gets an actionable failure list instead of an
//! all-or-nothing abort.

use crate::error::Result;
use crate::migrate::report::{MigrationOutcome, MigrationReport};
use crate::migrate::transform::transform;
use crate::store::types::{SessionKey, UpsertOutcome};
use crate::store::{DestinationStore, SourceStore};
use std::time::Instant;

/// Orchestrates a single migration run over injected store capabilities
///
/// Holds no connection state of its own; the source and destination are
/// explicit dependencies so any conforming store implementation can be
/// substituted.
pub struct MigrationRunner<'a, S, D> {
    source: &'a S,
    dest: &'a D,
}

impl<'a, S: SourceStore, D: DestinationStore> MigrationRunner<'a, S, D> {
    pub fn new(source: &'a S, dest: &'a D) -> Self {
        Self { source, dest }
    }

    /// Migrate every session under `prefix` and return the report.
    ///
    /// Safe to re-run after an interruption: already-migrated sessions
    /// come back as `SkippedDuplicate` and are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error only when enumeration fails; a partial key list
    /// could silently skip live sessions, so the run aborts before any
    /// write. Every later failure is isolated to its key and recorded
    /// in the report instead of raised.
    pub fn run(&self, prefix: &str) -> Result<MigrationReport> {
        let started = Instant::now();

        let keys = self.source.list_keys(prefix)?;
        tracing::info!(total = keys.len(), prefix, "Enumerated source keys");

        let mut report = MigrationReport::new();
        report.total = keys.len();

        for key in &keys {
            let outcome = self.migrate_key(prefix, key);
            match &outcome {
                MigrationOutcome::Migrated => tracing::debug!(%key, "Migrated"),
                MigrationOutcome::SkippedMissing => {
                    tracing::debug!(%key, "Value vanished before read, skipping")
                }
                MigrationOutcome::SkippedDuplicate => {
                    tracing::debug!(%key, "Already at destination, skipping")
                }
                MigrationOutcome::Failed(reason) => {
                    tracing::warn!(%key, reason, "Failed to migrate key")
                }
            }
            report.record(key, outcome);
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            total = report.total,
            migrated = report.migrated,
            skipped_missing = report.skipped_missing,
            skipped_duplicate = report.skipped_duplicate,
            failed = report.failed.len(),
            elapsed_ms = report.elapsed_ms,
            "Migration run complete"
        );

        Ok(report)
    }

    /// Dry run: report what `run` would do without writing anything.
    ///
    /// Keys already present at the destination count as
    /// `SkippedDuplicate`; a `Migrated` count here means "would be
    /// migrated".
    pub fn scan(&self, prefix: &str) -> Result<MigrationReport> {
        let started = Instant::now();

        let keys = self.source.list_keys(prefix)?;
        tracing::info!(total = keys.len(), prefix, "Enumerated source keys (dry run)");

        let mut report = MigrationReport::new();
        report.total = keys.len();

        for key in &keys {
            let outcome = self.inspect_key(prefix, key);
            report.record(key, outcome);
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }

    fn migrate_key(&self, prefix: &str, key: &SessionKey) -> MigrationOutcome {
        let value = match self.source.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => return MigrationOutcome::SkippedMissing,
            Err(e) => return MigrationOutcome::Failed(e.to_string()),
        };

        let record = match transform(prefix, key, &value) {
            Ok(record) => record,
            Err(e) => return MigrationOutcome::Failed(e.to_string()),
        };

        match self.dest.upsert_if_absent(&record) {
            Ok(UpsertOutcome::Inserted) => MigrationOutcome::Migrated,
            Ok(UpsertOutcome::AlreadyExists) => MigrationOutcome::SkippedDuplicate,
            Err(e) => MigrationOutcome::Failed(e.to_string()),
        }
    }

    fn inspect_key(&self, prefix: &str, key: &SessionKey) -> MigrationOutcome {
        let value = match self.source.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => return MigrationOutcome::SkippedMissing,
            Err(e) => return MigrationOutcome::Failed(e.to_string()),
        };

        let record = match transform(prefix, key, &value) {
            Ok(record) => record,
            Err(e) => return MigrationOutcome::Failed(e.to_string()),
        };

        match self.dest.contains(&record.session_id) {
            Ok(true) => MigrationOutcome::SkippedDuplicate,
            Ok(false) => MigrationOutcome::Migrated,
            Err(e) => MigrationOutcome::Failed(e.to_string()),
        }
    }
}
