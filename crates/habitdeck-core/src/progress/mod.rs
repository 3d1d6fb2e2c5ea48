//! Progress store: habit list, per-day completion flags, daily notes.

mod autosave;
mod habits;
mod notes;
mod record;

pub use autosave::{NoteAutosave, NoteSink, DEFAULT_AUTOSAVE_DELAY};
pub use habits::{HabitList, DEFAULT_HABITS};
pub use notes::DailyNotes;
pub use record::{CompactReport, ProgressRecord};
