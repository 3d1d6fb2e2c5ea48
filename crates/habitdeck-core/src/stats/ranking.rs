//! Monthly habit ranking.
//!
//! Each habit scores `completions / days_in_month * 100`, rounded to one
//! decimal. The denominator is the full calendar month, so a habit done every
//! day of June scores 100 only on June 30.

use serde::{Deserialize, Serialize};

use super::round_tenth;
use crate::calendar::MonthKey;
use crate::progress::{HabitList, ProgressRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHabit {
    /// 1-based position after sorting.
    pub rank: usize,
    pub habit: String,
    /// Percentage of the month's days on which the habit was done.
    pub score: f64,
    /// Days in the month on which the habit was done.
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRanking {
    pub month: MonthKey,
    pub days_in_month: u32,
    pub entries: Vec<RankedHabit>,
}

/// Rank `habits` by their completion rate in `month`.
///
/// Highest score first; equal scores keep habit-list order.
pub fn rank_habits(record: &ProgressRecord, habits: &HabitList, month: MonthKey) -> MonthlyRanking {
    let days_in_month = month.days_in_month();

    let mut entries: Vec<RankedHabit> = habits
        .iter()
        .map(|habit| {
            let count = record.count_for_habit(habit, month);
            RankedHabit {
                rank: 0,
                habit: habit.to_string(),
                score: round_tenth(f64::from(count) / f64::from(days_in_month) * 100.0),
                count,
            }
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    MonthlyRanking {
        month,
        days_in_month,
        entries,
    }
}
