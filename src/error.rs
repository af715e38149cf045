//! Error types for Sessmig
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Sessmig operations
///
/// This enum encompasses all possible errors that can occur while
/// loading configuration, enumerating the source cache, decoding
/// session payloads, and writing to the destination store.
#[derive(Error, Debug)]
pub enum SessmigError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source store cannot be reached or enumerated.
    ///
    /// Fatal to a migration run: a partial key list could silently
    /// skip live sessions, so nothing is written after this error.
    #[error("Source store unavailable: {0}")]
    StoreUnavailable(String),

    /// A session payload could not be decoded (per-key, non-fatal)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Destination storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Sessmig operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
