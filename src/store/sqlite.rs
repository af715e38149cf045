//! SQLite destination store
//!
//! Relational home for canonical session records. The table keys on
//! `session_id`, which is what makes the migration's upsert idempotent.

use crate::error::{Result, SessmigError};
use crate::store::types::{SessionRecord, UpsertOutcome};
use crate::store::DestinationStore;
use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// Destination store backed by a SQLite database
pub struct SqliteDestination {
    db_path: PathBuf,
}

impl SqliteDestination {
    /// Create a new destination instance
    ///
    /// Initializes the database file in the user's data directory.
    pub fn new() -> Result<Self> {
        // Allow override of the destination DB path via environment variable.
        // This makes it easy to point the binary at a test DB or alternate file
        // without changing the user's application data dir.
        if let Ok(override_path) = std::env::var("SESSMIG_DEST_DB") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "sessmig", "sessmig")
            .ok_or_else(|| SessmigError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        let db_path = data_dir.join("sessions.db");
        let dest = Self { db_path };

        dest.init()?;

        Ok(dest)
    }

    /// Create a new destination instance that uses the specified database path.
    ///
    /// This is primarily useful for tests where the default application data
    /// directory is not desirable (for example, using a temporary directory).
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| SessmigError::Storage(e.to_string()))?;
        }

        let dest = Self { db_path };
        dest.init()?;
        Ok(dest)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                data JSON NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| SessmigError::Storage(e.to_string()))?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| SessmigError::Storage(e.to_string()).into())
    }

    /// Load a session row by ID
    ///
    /// Used by operators (and tests) to inspect what a run actually wrote.
    pub fn get(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let conn = self.connect()?;

        let row = conn
            .query_row(
                "SELECT data, created_at, updated_at FROM sessions WHERE session_id = ?",
                params![session_id],
                |row| {
                    let data_json: String = row.get(0)?;
                    let created_at: String = row.get(1)?;
                    let updated_at: String = row.get(2)?;
                    Ok((data_json, created_at, updated_at))
                },
            )
            .optional()
            .context("Failed to query session")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        match row {
            Some((data_json, created_at, updated_at)) => {
                let data = serde_json::from_str(&data_json)
                    .context("Failed to deserialize session data")
                    .map_err(|e| SessmigError::Storage(e.to_string()))?;
                Ok(Some(SessionRecord {
                    session_id: session_id.to_string(),
                    data,
                    created_at: parse_timestamp(&created_at),
                    updated_at: parse_timestamp(&updated_at),
                }))
            }
            None => Ok(None),
        }
    }
}

impl DestinationStore for SqliteDestination {
    fn upsert_if_absent(&self, record: &SessionRecord) -> Result<UpsertOutcome> {
        let mut conn = self.connect()?;

        let data_json = serde_json::to_string(&record.data)
            .context("Failed to serialize session data")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        let now = Utc::now();
        let created_at = record.created_at.unwrap_or(now).to_rfc3339();
        let updated_at = record.updated_at.unwrap_or(now).to_rfc3339();

        let tx = conn
            .transaction()
            .context("Failed to start transaction")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        // Check-then-insert inside the transaction: an existing row is
        // left untouched so a retried run never clobbers writes that
        // happened through normal application traffic.
        let exists: bool = tx
            .query_row(
                "SELECT 1 FROM sessions WHERE session_id = ?",
                params![record.session_id],
                |_| Ok(true),
            )
            .optional()
            .unwrap_or(Some(false))
            .unwrap_or(false);

        if exists {
            return Ok(UpsertOutcome::AlreadyExists);
        }

        tx.execute(
            "INSERT INTO sessions (session_id, data, created_at, updated_at)
            VALUES (?, ?, ?, ?)",
            params![record.session_id, data_json, created_at, updated_at],
        )
        .context("Failed to insert session")
        .map_err(|e| SessmigError::Storage(e.to_string()))?;

        tx.commit()
            .context("Failed to commit transaction")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        Ok(UpsertOutcome::Inserted)
    }

    fn contains(&self, session_id: &str) -> Result<bool> {
        let conn = self.connect()?;

        let exists = conn
            .query_row(
                "SELECT 1 FROM sessions WHERE session_id = ?",
                params![session_id],
                |_| Ok(true),
            )
            .optional()
            .context("Failed to query session")
            .map_err(|e| SessmigError::Storage(e.to_string()))?;

        Ok(exists.unwrap_or(false))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
