mod config;
pub mod database;
pub mod keys;

pub use config::{Config, HabitsConfig, LoggingConfig, NotesConfig, StreakConfig, SyncConfig};
pub use database::{Database, NoteStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `HABITDECK_DATA_DIR` wins when set. Otherwise `~/.config/habitdeck`, or
/// `~/.config/habitdeck-dev` with `HABITDECK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITDECK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITDECK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitdeck-dev")
            } else {
                base_dir.join("habitdeck")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
