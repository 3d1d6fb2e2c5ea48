//! Cloud sync gateway.
//!
//! Pushes the full local state (habits, progress, notes) to a remote
//! collector after mutations. One-way and best-effort.

mod gateway;
mod types;

pub use gateway::{parse_endpoint, SyncGateway, DEFAULT_SYNC_ENDPOINT, DEFAULT_SYNC_TIMEOUT};
pub use types::{SyncError, SyncOutcome, SyncPayload};
