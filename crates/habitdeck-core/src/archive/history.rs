use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calendar::MonthKey;
use crate::error::{CoreError, Result};
use crate::progress::{HabitList, ProgressRecord};
use crate::stats::MonthSummary;

/// Frozen copy of one finished month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub data: ProgressRecord,
    pub habits: HabitList,
    pub summary: MonthSummary,
}

/// Month key → archived month. Entries are written once and never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryArchive(BTreeMap<MonthKey, ArchiveEntry>);

impl HistoryArchive {
    /// Store `entry` under `month`.
    ///
    /// # Errors
    /// [`CoreError::ArchiveConflict`] if the month is already archived.
    pub fn insert(&mut self, month: MonthKey, entry: ArchiveEntry) -> Result<&ArchiveEntry> {
        use std::collections::btree_map::Entry;
        match self.0.entry(month) {
            Entry::Occupied(_) => Err(CoreError::ArchiveConflict(month)),
            Entry::Vacant(slot) => Ok(slot.insert(entry)),
        }
    }

    pub fn get(&self, month: MonthKey) -> Option<&ArchiveEntry> {
        self.0.get(&month)
    }

    pub fn contains(&self, month: MonthKey) -> bool {
        self.0.contains_key(&month)
    }

    /// Archived months, oldest first.
    pub fn month_keys(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, &ArchiveEntry)> {
        self.0.iter().map(|(month, entry)| (*month, entry))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
