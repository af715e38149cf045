use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw session payload as stored by the source cache: an unordered
/// mapping from field name to arbitrary JSON value.
pub type RawSessionValue = serde_json::Map<String, serde_json::Value>;

/// Full namespaced key of a session in the source cache
///
/// Opaque to everything except the transformer, which strips the
/// namespace prefix to derive the canonical session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Canonical session record written to the destination store
///
/// Decoupled from either store's native representation. `session_id` is
/// the key with the namespace prefix stripped; `data` carries every field
/// of the raw value except the embedded key-identity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier (never includes the namespace prefix)
    pub session_id: String,
    /// Session fields, minus the key-identity field
    pub data: RawSessionValue,
    /// Creation timestamp, if the source payload carried one.
    /// The destination stamps the current time when this is `None`.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp, if the source payload carried one
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of an idempotent upsert at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record with this `session_id` existed; the record was inserted
    Inserted,
    /// A record with this `session_id` already exists; nothing was written
    AlreadyExists,
}
