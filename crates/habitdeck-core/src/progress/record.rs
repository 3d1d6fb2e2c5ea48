//! The progress record: day → habit → completion flag.
//!
//! A missing `(day, habit)` pair means "not done". Flags are never stored as
//! `false`: toggling off removes the entry, and [`ProgressRecord::compact`]
//! removes any ghost entry that arrived through persisted state.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::{DayKey, MonthKey};

/// Result of a compaction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactReport {
    /// Habit flags removed because they were not exactly `true`.
    pub removed_flags: usize,
    /// Days removed because no flags remained.
    pub removed_days: usize,
}

impl CompactReport {
    pub fn changed(&self) -> bool {
        self.removed_flags > 0 || self.removed_days > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    days: BTreeMap<DayKey, BTreeMap<String, bool>>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for `(day, habit)` and return the new state.
    ///
    /// No temporal guard here; see `HabitTracker::toggle`.
    pub fn toggle(&mut self, day: DayKey, habit: &str) -> bool {
        let flags = self.days.entry(day).or_default();
        let done = !flags.get(habit).copied().unwrap_or(false);
        if done {
            flags.insert(habit.to_string(), true);
        } else {
            flags.remove(habit);
            if flags.is_empty() {
                self.days.remove(&day);
            }
        }
        done
    }

    pub fn is_done(&self, day: DayKey, habit: &str) -> bool {
        self.days
            .get(&day)
            .and_then(|flags| flags.get(habit))
            .copied()
            .unwrap_or(false)
    }

    /// Number of habits marked done on `day`.
    pub fn completions_on(&self, day: DayKey) -> usize {
        self.days
            .get(&day)
            .map(|flags| flags.values().filter(|done| **done).count())
            .unwrap_or(0)
    }

    pub fn has_completions(&self, day: DayKey) -> bool {
        self.completions_on(day) > 0
    }

    /// Days with at least one completion, ascending.
    pub fn days_with_completions(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days
            .iter()
            .filter(|(_, flags)| flags.values().any(|done| *done))
            .map(|(day, _)| *day)
    }

    /// Days in `month` on which `habit` is done.
    pub fn count_for_habit(&self, habit: &str, month: MonthKey) -> u32 {
        self.days
            .iter()
            .filter(|(day, flags)| month.contains(**day) && flags.get(habit) == Some(&true))
            .count() as u32
    }

    pub fn total_completions(&self) -> usize {
        self.days
            .values()
            .map(|flags| flags.values().filter(|done| **done).count())
            .sum()
    }

    /// Drop every flag that is not `true`, then every empty day. Idempotent.
    pub fn compact(&mut self) -> CompactReport {
        let mut report = CompactReport::default();
        self.days.retain(|_, flags| {
            let before = flags.len();
            flags.retain(|_, done| *done);
            report.removed_flags += before - flags.len();
            if flags.is_empty() {
                report.removed_days += 1;
                false
            } else {
                true
            }
        });
        report
    }

    /// Remove `habit` from every day. Returns how many days lost a flag.
    pub fn remove_habit(&mut self, habit: &str) -> usize {
        let mut touched = 0;
        self.days.retain(|_, flags| {
            if flags.remove(habit).is_some() {
                touched += 1;
            }
            !flags.is_empty()
        });
        touched
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of stored days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &BTreeMap<String, bool>)> {
        self.days.iter().map(|(day, flags)| (*day, flags))
    }
}

impl<'de> Deserialize<'de> for ProgressRecord {
    /// Accepts what older clients persisted: any JSON value as a flag (only
    /// `true` counts as done, the rest become ghost entries for `compact`),
    /// and skips day keys that are not valid dates.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            BTreeMap::deserialize(deserializer)?;

        let mut days = BTreeMap::new();
        for (key, flags) in raw {
            let Ok(day) = key.parse::<DayKey>() else {
                tracing::warn!(day = %key, "dropping progress entry with invalid day key");
                continue;
            };
            let flags = flags
                .into_iter()
                .map(|(habit, value)| (habit, value == serde_json::Value::Bool(true)))
                .collect();
            days.insert(day, flags);
        }
        Ok(Self { days })
    }
}
