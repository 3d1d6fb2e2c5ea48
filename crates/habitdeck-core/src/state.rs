//! The complete mutable state of one tracker.

use serde::{Deserialize, Serialize};

use crate::archive::HistoryArchive;
use crate::calendar::{DayKey, MonthKey};
use crate::progress::{DailyNotes, HabitList, ProgressRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    pub habits: HabitList,
    pub progress: ProgressRecord,
    pub notes: DailyNotes,
    pub history: HistoryArchive,
    /// Month the progress record currently belongs to.
    pub active_month: Option<MonthKey>,
    /// Monday of the week last seen at startup.
    pub active_week_monday: Option<DayKey>,
}

impl TrackerState {
    /// Fresh state with the given habit seed.
    pub fn seeded<S: AsRef<str>>(seed: &[S]) -> Self {
        Self {
            habits: HabitList::seeded(seed),
            ..Self::default()
        }
    }
}
