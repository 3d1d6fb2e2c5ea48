//! # Habitdeck Core Library
//!
//! Core logic for Habitdeck, a daily habit tracker. All operations are
//! available through the standalone `habitdeck` CLI binary, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Calendar**: day/month keys, Monday-start weeks, injectable clock
//! - **Progress**: habit list, per-day completion flags, daily notes and a
//!   debounced note autosave task
//! - **Stats**: streaks, the monthly ranking, daily and monthly summaries
//! - **Archive**: month rollover into a write-once history
//! - **Storage**: SQLite key-value persistence and TOML configuration
//! - **Sync**: fire-and-forget push of the full state to a remote collector
//!
//! ## Key Components
//!
//! - [`HabitTracker`]: owns the state and enforces the day lock
//! - [`Database`]: persisted state keys
//! - [`Config`]: application configuration management
//! - [`SyncGateway`]: HTTP push of a [`SyncPayload`]

pub mod archive;
pub mod calendar;
pub mod error;
pub mod events;
pub mod progress;
pub mod state;
pub mod stats;
pub mod storage;
pub mod sync;
pub mod tracker;

pub use archive::{ArchiveEntry, HistoryArchive, MonthCheck};
pub use calendar::{Clock, DayKey, FixedClock, MonthKey, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use progress::{DailyNotes, HabitList, NoteAutosave, NoteSink, ProgressRecord};
pub use state::TrackerState;
pub use stats::{MonthSummary, MonthlyRanking, RankedHabit, Streak};
pub use storage::{Config, Database, NoteStore};
pub use sync::{SyncError, SyncGateway, SyncOutcome, SyncPayload};
pub use tracker::{HabitTracker, SharedTracker};
