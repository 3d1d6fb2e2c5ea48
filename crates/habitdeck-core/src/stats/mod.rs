//! Derived metrics over the progress record.
//!
//! Everything here is a pure read of the store: streaks, the monthly
//! ranking, daily progress, month summaries and per-day activity series.

mod ranking;
mod streak;
mod summary;

pub use ranking::{rank_habits, MonthlyRanking, RankedHabit};
pub use streak::{Streak, StreakEngine, DEFAULT_MAX_LOOKBACK_DAYS};
pub use summary::{
    activity_series, daily_progress, summarize_month, ActivityPoint, DailyProgress, MonthSummary,
};

/// Round to one decimal place.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
