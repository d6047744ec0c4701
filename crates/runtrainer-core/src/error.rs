//! Core error types for runtrainer-core.
//!
//! Validation errors are synchronous and leave core state untouched.
//! Store errors come from the persistence collaborator; whether they are
//! surfaced or only logged is decided by the caller (see `progress` and
//! `catalog`).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for runtrainer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence collaborator failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Identity lookup/creation errors
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Lookup of a workout id that is not in the catalog
    #[error("Workout not found: {0}")]
    WorkoutNotFound(String),

    /// Generated plans are immutable
    #[error("Workout '{0}' is part of a generated plan and cannot be deleted")]
    ImmutableWorkout(String),
}

/// Validation errors. Each carries a user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Workout title is required
    #[error("Workout title must not be empty")]
    EmptyTitle,

    /// Step durations must be positive
    #[error("Step '{name}' must last at least one second")]
    InvalidDuration { name: String },

    /// Loop cycles must be positive
    #[error("Loop must repeat at least once")]
    InvalidCycles,

    /// The structure expands to nothing
    #[error("Nothing to run: workout has no steps")]
    EmptyQueue,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Local-only session, nothing can be persisted
    #[error("No authenticated identity; session is local-only")]
    NoIdentity,

    /// Document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Backend query failed
    #[error("Database error: {0}")]
    Database(String),

    /// Document could not be encoded/decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend unreachable or refused the write
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory cannot be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Identity errors.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid identity format: {0}")]
    InvalidFormat(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
