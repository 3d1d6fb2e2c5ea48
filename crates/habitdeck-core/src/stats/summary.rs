//! Daily progress, month summaries and activity series.

use serde::{Deserialize, Deserializer, Serialize};

use super::round_tenth;
use crate::calendar::{DayKey, MonthKey};
use crate::progress::{HabitList, ProgressRecord};

/// Completion for a single day against the current habit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub completed: usize,
    pub total: usize,
    /// Whole percent, 0-100.
    pub percent: u32,
}

pub fn daily_progress(record: &ProgressRecord, habits: &HabitList, day: DayKey) -> DailyProgress {
    let total = habits.len();
    let completed = habits.iter().filter(|h| record.is_done(day, h)).count();
    let percent = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };
    DailyProgress {
        completed,
        total,
        percent,
    }
}

/// Totals for one month, as stored in the history archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub total_completions: u32,
    /// Percent of possible completions, one decimal.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub success_rate: f64,
}

/// Summarize a month's record.
///
/// `success_rate = total / (habit_count * days_in_month) * 100`, or 0 when
/// there is nothing to divide by.
pub fn summarize_month(
    record: &ProgressRecord,
    habit_count: usize,
    days_in_month: u32,
) -> MonthSummary {
    let total_completions = record.total_completions() as u32;
    let possible = habit_count as f64 * f64::from(days_in_month);
    let success_rate = if possible > 0.0 {
        round_tenth(f64::from(total_completions) / possible * 100.0)
    } else {
        0.0
    };
    MonthSummary {
        total_completions,
        success_rate,
    }
}

/// Older archives stored the rate as formatted text ("33.3").
fn number_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rate {
        Number(f64),
        Text(String),
    }

    match Rate::deserialize(deserializer)? {
        Rate::Number(n) => Ok(n),
        Rate::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Completions on one day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    /// Day of month, 1-based.
    pub day: u32,
    pub completed: usize,
}

/// One point per day of `month`, zero where nothing was recorded.
pub fn activity_series(record: &ProgressRecord, month: MonthKey) -> Vec<ActivityPoint> {
    month
        .days()
        .enumerate()
        .map(|(i, day)| ActivityPoint {
            day: i as u32 + 1,
            completed: record.completions_on(day),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn daily_progress_counts_listed_habits() {
        let mut record = ProgressRecord::new();
        record.toggle(day("2025-06-03"), "A");
        let habits = HabitList::seeded(&["A", "B", "C"]);

        let progress = daily_progress(&record, &habits, day("2025-06-03"));
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percent, 33);
    }

    #[test]
    fn daily_progress_without_habits_is_zero() {
        let progress = daily_progress(&ProgressRecord::new(), &HabitList::new(), day("2025-06-03"));
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn summary_success_rate() {
        let mut record = ProgressRecord::new();
        for d in 1..=10 {
            record.toggle(day(&format!("2025-05-{d:02}")), "A");
        }
        let summary = summarize_month(&record, 2, 31);
        assert_eq!(summary.total_completions, 10);
        assert_eq!(summary.success_rate, 16.1);
    }

    #[test]
    fn summary_with_no_habits_is_zero_rate() {
        let summary = summarize_month(&ProgressRecord::new(), 0, 31);
        assert_eq!(summary, MonthSummary::default());
    }

    #[test]
    fn summary_accepts_text_rate() {
        let summary: MonthSummary =
            serde_json::from_str(r#"{"totalCompletions": 4, "successRate": "12.9"}"#).unwrap();
        assert_eq!(summary.success_rate, 12.9);
        let summary: MonthSummary =
            serde_json::from_str(r#"{"totalCompletions": 0, "successRate": 0}"#).unwrap();
        assert_eq!(summary.success_rate, 0.0);
    }

    #[test]
    fn activity_series_covers_every_day() {
        let mut record = ProgressRecord::new();
        record.toggle(day("2025-02-14"), "A");
        record.toggle(day("2025-02-14"), "B");

        let series = activity_series(&record, "2025-02".parse().unwrap());
        assert_eq!(series.len(), 28);
        assert_eq!(series[13], ActivityPoint { day: 14, completed: 2 });
        assert_eq!(series.iter().map(|p| p.completed).sum::<usize>(), 2);
    }
}
