use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{DayKey, MonthKey};
use crate::stats::MonthSummary;

/// Every state change in the tracker produces an Event.
/// Presentation layers re-read the derived views after receiving one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitToggled {
        day: DayKey,
        habit: String,
        done: bool,
        at: DateTime<Utc>,
    },
    HabitAdded {
        habit: String,
        at: DateTime<Utc>,
    },
    /// A habit was deleted along with its flags on `cleared_days` days.
    HabitRemoved {
        habit: String,
        cleared_days: usize,
        at: DateTime<Utc>,
    },
    NoteSaved {
        day: DayKey,
        at: DateTime<Utc>,
    },
    /// First run: the active month marker was initialized.
    MonthStarted {
        month: MonthKey,
        at: DateTime<Utc>,
    },
    /// The outgoing month was archived and the record reset.
    MonthArchived {
        month: MonthKey,
        next: MonthKey,
        summary: MonthSummary,
        at: DateTime<Utc>,
    },
    WeekStarted {
        monday: DayKey,
        at: DateTime<Utc>,
    },
    Compacted {
        removed_flags: usize,
        removed_days: usize,
        at: DateTime<Utc>,
    },
}
