//! Store capabilities consumed by the migration
//!
//! Defines the two trait seams the runner depends on: a source of
//! namespaced session keys and values, and a destination with an
//! idempotent upsert keyed on `session_id`. Concrete implementations
//! (`SledCache`, `SqliteDestination`) live in submodules; anything
//! conforming to these traits can be substituted, which is what the
//! runner's tests do.

use crate::error::Result;

pub mod cache;
pub mod sqlite;
pub mod types;

pub use cache::SledCache;
pub use sqlite::SqliteDestination;
pub use types::{RawSessionValue, SessionKey, SessionRecord, UpsertOutcome};

/// Read-only view of the source cache store
///
/// Keys and values are never mutated through this trait. The source may
/// be receiving live traffic while a migration runs, so `list_keys` must
/// return the current live set on every call and `read` must treat a
/// vanished key as an ordinary `None`, not an error.
pub trait SourceStore {
    /// Enumerate every key in the store beginning with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `SessmigError::StoreUnavailable` if the store cannot be
    /// reached or scanned. Callers treat any error here as fatal.
    fn list_keys(&self, prefix: &str) -> Result<Vec<SessionKey>>;

    /// Fetch and decode the value for `key`.
    ///
    /// Returns `Ok(None)` when the key no longer exists (sessions expire
    /// and get invalidated during the run; this is an expected race).
    ///
    /// # Errors
    ///
    /// Returns `SessmigError::Decode` for a malformed payload and
    /// `SessmigError::Storage` for a retrieval failure. Both are
    /// per-key conditions; callers must not abort the run on them.
    fn read(&self, key: &SessionKey) -> Result<Option<RawSessionValue>>;
}

/// Destination store with a unique constraint on `session_id`
pub trait DestinationStore {
    /// Insert `record` only if no record with its `session_id` exists.
    ///
    /// Never overwrites: an existing row may carry writes from normal
    /// application traffic after a partial prior run.
    fn upsert_if_absent(&self, record: &SessionRecord) -> Result<UpsertOutcome>;

    /// Whether a record with `session_id` is already present
    fn contains(&self, session_id: &str) -> Result<bool>;
}
