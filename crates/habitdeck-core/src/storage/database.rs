//! SQLite-backed key-value storage for tracker state.
//!
//! Each persisted key (see [`super::keys`]) is one row in the `kv` table.
//! JSON-valued keys are decoded independently: a key that fails to parse
//! falls back to its default with a warning instead of failing the load.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{data_dir, keys};
use crate::archive::HistoryArchive;
use crate::calendar::{DayKey, MonthKey};
use crate::error::{CoreError, DatabaseError, Result};
use crate::progress::{DailyNotes, HabitList, NoteSink, ProgressRecord};
use crate::state::TrackerState;

/// SQLite database holding the persisted state keys.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/habitdeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("habitdeck.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Decode a JSON-valued key.
    ///
    /// # Errors
    /// [`CoreError::StorageCorruption`] when the stored text is not valid
    /// JSON for `T`.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::StorageCorruption {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Decode a JSON-valued key, falling back to `default` when it is
    /// missing or corrupt.
    pub fn load_json_or<T: DeserializeOwned>(&self, key: &str, default: impl FnOnce() -> T) -> Result<T> {
        match self.load_json(key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(default()),
            Err(CoreError::StorageCorruption { key, message }) => {
                tracing::warn!(%key, %message, "corrupt persisted value, using default");
                Ok(default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)?;
        Ok(())
    }

    /// Load the full tracker state. A missing habit list is seeded with
    /// `seed`.
    pub fn load_state<S: AsRef<str>>(&self, seed: &[S]) -> Result<TrackerState> {
        Ok(TrackerState {
            habits: self.load_json_or(keys::HABITS, || HabitList::seeded(seed))?,
            progress: self.load_json_or(keys::PROGRESS, ProgressRecord::new)?,
            notes: self.load_json_or(keys::NOTES, DailyNotes::default)?,
            history: self.load_json_or(keys::HISTORY, HistoryArchive::default)?,
            active_month: self.load_text::<MonthKey>(keys::ACTIVE_MONTH)?,
            active_week_monday: self.load_text::<DayKey>(keys::ACTIVE_WEEK_MONDAY)?,
        })
    }

    /// Write every state key in one transaction.
    pub fn save_state(&self, state: &TrackerState) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.save_json(keys::HABITS, &state.habits)?;
        self.save_json(keys::PROGRESS, &state.progress)?;
        self.save_json(keys::NOTES, &state.notes)?;
        self.save_json(keys::HISTORY, &state.history)?;
        self.save_text(keys::ACTIVE_MONTH, state.active_month)?;
        self.save_text(keys::ACTIVE_WEEK_MONDAY, state.active_week_monday)?;
        tx.commit()?;
        Ok(())
    }

    /// Read-modify-write of the notes key alone.
    pub fn save_note(&self, day: DayKey, text: &str) -> Result<()> {
        let mut notes: DailyNotes = self.load_json_or(keys::NOTES, DailyNotes::default)?;
        notes.set(day, text);
        self.save_json(keys::NOTES, &notes)
    }

    fn load_text<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(None);
        };
        match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(%key, error = %e, "corrupt persisted marker, ignoring");
                Ok(None)
            }
        }
    }

    fn save_text<T: std::fmt::Display>(&self, key: &str, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.kv_set(key, &value.to_string())?,
            None => self.kv_delete(key)?,
        }
        Ok(())
    }
}

/// Note sink writing straight to the database, for debounced autosave.
pub struct NoteStore {
    db: Mutex<Database>,
}

impl NoteStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn into_inner(self) -> Database {
        self.db.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteSink for NoteStore {
    fn save_note(&self, day: DayKey, text: &str) -> Result<()> {
        self.db
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .save_note(day, text)
    }
}
