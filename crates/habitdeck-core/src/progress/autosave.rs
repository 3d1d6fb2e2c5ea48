//! Debounced note autosave.
//!
//! Every input event cancels the pending write and schedules a new one after
//! an idle gap, so a burst of keystrokes produces a single write of the last
//! draft.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::calendar::DayKey;
use crate::error::Result;

/// Idle gap before a draft is written.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

/// Destination of autosaved notes.
pub trait NoteSink: Send + Sync + 'static {
    fn save_note(&self, day: DayKey, text: &str) -> Result<()>;
}

type Draft = Arc<Mutex<Option<(DayKey, String)>>>;

pub struct NoteAutosave<S: NoteSink> {
    sink: Arc<S>,
    delay: Duration,
    draft: Draft,
    pending: Option<JoinHandle<()>>,
}

impl<S: NoteSink> NoteAutosave<S> {
    pub fn new(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            draft: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    /// Record a new draft and (re)start the idle timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, day: DayKey, text: impl Into<String>) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        *lock(&self.draft) = Some((day, text.into()));

        let draft = Arc::clone(&self.draft);
        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some((day, text)) = lock(&draft).take() else {
                return;
            };
            match sink.save_note(day, &text) {
                Ok(()) => tracing::debug!(%day, "note autosaved"),
                Err(e) => tracing::warn!(%day, error = %e, "note autosave failed"),
            }
        }));
    }

    /// Whether a draft is waiting for its idle timer.
    pub fn is_pending(&self) -> bool {
        lock(&self.draft).is_some()
    }

    /// Cancel the timer and write the unsaved draft now.
    ///
    /// Returns whether anything was written.
    pub fn flush(&mut self) -> Result<bool> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let Some((day, text)) = lock(&self.draft).take() else {
            return Ok(false);
        };
        self.sink.save_note(day, &text)?;
        Ok(true)
    }
}

impl<S: NoteSink> Drop for NoteAutosave<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

fn lock(draft: &Draft) -> std::sync::MutexGuard<'_, Option<(DayKey, String)>> {
    draft.lock().unwrap_or_else(PoisonError::into_inner)
}
