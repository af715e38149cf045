//! Sled-backed source cache
//!
//! Read-only view of the namespaced session cache being migrated away
//! from. Values are JSON objects serialized with `serde_json`.

use crate::error::{Result, SessmigError};
use crate::store::types::{RawSessionValue, SessionKey};
use crate::store::SourceStore;
use sled::Db;
use std::path::Path;

/// Source cache store backed by an embedded `sled` database
#[derive(Debug)]
pub struct SledCache {
    db: Db,
}

impl SledCache {
    /// Open the cache database
    ///
    /// # Errors
    ///
    /// Returns `SessmigError::StoreUnavailable` if the database cannot
    /// be opened (missing path, lock held by another process).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| SessmigError::StoreUnavailable(format!("Failed to open cache: {}", e)))?;
        Ok(Self { db })
    }
}

impl SourceStore for SledCache {
    fn list_keys(&self, prefix: &str) -> Result<Vec<SessionKey>> {
        let mut keys = Vec::new();
        for entry in self.db.scan_prefix(prefix.as_bytes()) {
            let (key_bytes, _) = entry.map_err(|e| {
                SessmigError::StoreUnavailable(format!("Key scan failed: {}", e))
            })?;
            let key = String::from_utf8(key_bytes.to_vec()).map_err(|_| {
                // A non-UTF-8 key means a corrupt keyspace; skipping it
                // would silently lose a session, so the scan aborts.
                SessmigError::Decode(format!(
                    "Non-UTF-8 key in namespace {:?}: {:?}",
                    prefix, key_bytes
                ))
            })?;
            keys.push(SessionKey(key));
        }
        Ok(keys)
    }

    fn read(&self, key: &SessionKey) -> Result<Option<RawSessionValue>> {
        let bytes = match self
            .db
            .get(key.as_str().as_bytes())
            .map_err(|e| SessmigError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| SessmigError::Decode(format!("Invalid payload for {}: {}", key, e)))?;

        match value {
            serde_json::Value::Object(map) => Ok(Some(map)),
            other => Err(SessmigError::Decode(format!(
                "Payload for {} is not a JSON object (found {})",
                key,
                type_name(&other)
            ))
            .into()),
        }
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
