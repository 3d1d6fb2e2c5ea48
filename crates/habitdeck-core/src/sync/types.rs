//! Core types for cloud sync.

use serde::{Deserialize, Serialize};

use crate::progress::{DailyNotes, HabitList, ProgressRecord};
use crate::state::TrackerState;

/// Full local state as the remote collector expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub email: String,
    pub habits: HabitList,
    pub progress_data: ProgressRecord,
    pub daily_notes: DailyNotes,
    pub timezone: String,
}

impl SyncPayload {
    /// Snapshot `state` for a push.
    ///
    /// # Errors
    /// [`SyncError::NoIdentity`] when no (non-blank) email is configured.
    pub fn from_state(
        state: &TrackerState,
        email: Option<&str>,
        timezone: &str,
    ) -> Result<Self, SyncError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(SyncError::NoIdentity)?;
        Ok(Self {
            email: email.to_string(),
            habits: state.habits.clone(),
            progress_data: state.progress.clone(),
            daily_notes: state.notes.clone(),
            timezone: timezone.to_string(),
        })
    }
}

/// Result of a fire-and-forget push, for callers that await the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Synced,
    Failed { reason: String },
}

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Sync cancelled: no user email configured")]
    NoIdentity,

    #[error("Invalid sync endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Server refused sync (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
