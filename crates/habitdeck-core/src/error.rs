//! Core error types for habitdeck-core.
//!
//! This module defines the error hierarchy using thiserror. Only the I/O
//! boundary (persisted state, configuration files, network) can fail;
//! engine operations over well-formed in-memory state are total apart from
//! the lock and validation checks the tracker performs.

use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::{DayKey, MonthKey};

/// Core error type for habitdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A toggle was attempted for a day other than today.
    #[error("Access locked: habits can only be updated for today ({today}), not {attempted}")]
    LockViolation { attempted: DayKey, today: DayKey },

    /// Persisted or in-memory state is inconsistent beyond repair.
    #[error("Storage corruption in '{key}': {message}")]
    StorageCorruption { key: String, message: String },

    /// An archive entry already exists for the outgoing month.
    #[error("Archive for {0} already exists and cannot be overwritten")]
    ArchiveConflict(MonthKey),

    /// The progress record belongs to a month other than today's; the
    /// month check has not run or could not complete.
    #[error("Progress record belongs to {active} but today is in {today}")]
    StaleMonth { active: MonthKey, today: MonthKey },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
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

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank input where a value is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Habit name not present in the habit list
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// Habit name already present in the habit list
    #[error("Habit already exists: {0}")]
    DuplicateHabit(String),

    /// Malformed day key
    #[error("Invalid day key '{0}': expected YYYY-MM-DD")]
    InvalidDayKey(String),

    /// Malformed month key
    #[error("Invalid month key '{0}': expected YYYY-MM")]
    InvalidMonthKey(String),

    /// Day after today where only today or earlier is allowed
    #[error("{0} is in the future")]
    FutureDay(DayKey),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_violation_names_both_days() {
        let err = CoreError::LockViolation {
            attempted: "2025-05-20".parse().unwrap(),
            today: "2025-06-03".parse().unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-05-20"));
        assert!(msg.contains("2025-06-03"));
    }

    #[test]
    fn locked_sqlite_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }
}
