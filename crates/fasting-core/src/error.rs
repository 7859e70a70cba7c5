//! Core error types for fasting-core.
//!
//! Caller mistakes (`InvalidArgument`, `InvalidState`) are rejected before any
//! mutation. Storage failures are passed through untouched; retry policy, if
//! any, belongs to the repository implementation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fasting-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A parameter was outside its valid range (e.g. a non-positive target).
    #[error("Invalid value for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// The operation does not apply to the fast in its current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Repository errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Repository errors. The cause is opaque to the session lifecycle.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// No record with the given identifier
    #[error("Fast {id} not found")]
    NotFound { id: i64 },

    /// A stored row could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
