//! Consecutive-day completion streaks.
//!
//! A day counts toward a streak when at least one habit is done on it.
//!
//! - **max**: the longest run of consecutive days anywhere in the record.
//! - **current**: the run ending today, or yesterday when today has nothing
//!   done yet (an unfinished day does not break the streak).

use serde::{Deserialize, Serialize};

use crate::calendar::DayKey;
use crate::error::{CoreError, Result};
use crate::progress::ProgressRecord;

/// Roughly three years of days.
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 1096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub max: u32,
}

/// Streak calculator over one record and one reference day.
pub struct StreakEngine<'a> {
    record: &'a ProgressRecord,
    today: DayKey,
    max_lookback_days: u32,
}

impl<'a> StreakEngine<'a> {
    pub fn new(record: &'a ProgressRecord, today: DayKey) -> Self {
        Self {
            record,
            today,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
        }
    }

    /// Bound the backward scan of [`current_streak`](Self::current_streak).
    pub fn with_lookback(mut self, days: u32) -> Self {
        self.max_lookback_days = days;
        self
    }

    /// Longest run of consecutive days with at least one completion.
    pub fn max_streak(&self) -> u32 {
        let mut max = 0;
        let mut run = 0;
        let mut last: Option<DayKey> = None;

        for day in self.record.days_with_completions() {
            run = match last {
                Some(prev) if day.days_since(prev) == 1 => run + 1,
                _ => 1,
            };
            max = max.max(run);
            last = Some(day);
        }
        max
    }

    /// Run of completed days walking back from today.
    ///
    /// # Errors
    /// Returns [`CoreError::StorageCorruption`] when the scan reaches the
    /// lookback bound without finding a day that ends the run.
    pub fn current_streak(&self) -> Result<u32> {
        let mut count = 0;
        let mut cursor = Some(self.today);

        for _ in 0..=self.max_lookback_days {
            let Some(day) = cursor else {
                return Ok(count);
            };
            if self.record.has_completions(day) {
                count += 1;
            } else if day != self.today {
                return Ok(count);
            }
            cursor = day.pred();
        }

        Err(CoreError::StorageCorruption {
            key: "progressData".into(),
            message: format!(
                "current streak scan did not terminate within {} days of {}",
                self.max_lookback_days, self.today
            ),
        })
    }

    pub fn streak(&self) -> Result<Streak> {
        Ok(Streak {
            current: self.current_streak()?,
            max: self.max_streak(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn record_with(days: &[&str]) -> ProgressRecord {
        let mut record = ProgressRecord::new();
        for d in days {
            record.toggle(day(d), "A");
        }
        record
    }

    #[test]
    fn empty_record_has_no_streak() {
        let record = ProgressRecord::new();
        let streak = StreakEngine::new(&record, day("2025-06-03")).streak().unwrap();
        assert_eq!(streak, Streak { current: 0, max: 0 });
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let record = record_with(&["2025-06-01", "2025-06-02", "2025-06-03"]);
        let engine = StreakEngine::new(&record, day("2025-06-03"));
        assert_eq!(engine.max_streak(), 3);
        assert_eq!(engine.current_streak().unwrap(), 3);
    }

    #[test]
    fn unfinished_today_does_not_break_streak() {
        let record = record_with(&["2025-06-01", "2025-06-02"]);
        let engine = StreakEngine::new(&record, day("2025-06-03"));
        assert_eq!(engine.current_streak().unwrap(), 2);
    }

    #[test]
    fn empty_yesterday_ends_streak() {
        let record = record_with(&["2025-05-30", "2025-05-31"]);
        let engine = StreakEngine::new(&record, day("2025-06-03"));
        assert_eq!(engine.current_streak().unwrap(), 0);
        assert_eq!(engine.max_streak(), 2);
    }

    #[test]
    fn gap_resets_run() {
        let record = record_with(&[
            "2025-06-01",
            "2025-06-02",
            "2025-06-04",
            "2025-06-05",
            "2025-06-06",
            "2025-06-07",
        ]);
        let engine = StreakEngine::new(&record, day("2025-06-07"));
        assert_eq!(engine.max_streak(), 4);
        assert_eq!(engine.current_streak().unwrap(), 4);
    }

    #[test]
    fn run_across_month_boundary() {
        let record = record_with(&["2025-05-30", "2025-05-31", "2025-06-01"]);
        let engine = StreakEngine::new(&record, day("2025-06-01"));
        assert_eq!(engine.max_streak(), 3);
        assert_eq!(engine.current_streak().unwrap(), 3);
    }

    #[test]
    fn unterminated_scan_is_storage_corruption() {
        let record = record_with(&["2025-06-01", "2025-06-02", "2025-06-03"]);
        let engine = StreakEngine::new(&record, day("2025-06-03")).with_lookback(1);
        assert!(matches!(
            engine.current_streak(),
            Err(CoreError::StorageCorruption { .. })
        ));
    }
}
