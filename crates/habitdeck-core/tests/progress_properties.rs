//! Property tests for the progress record and the metrics derived from it.

use chrono::{Days, NaiveDate};
use habitdeck_core::progress::{HabitList, ProgressRecord};
use habitdeck_core::stats::{rank_habits, StreakEngine};
use habitdeck_core::{DayKey, MonthKey};
use proptest::prelude::*;

const HABITS: [&str; 4] = ["A", "B", "C", "D"];

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn day(offset: u64) -> DayKey {
    DayKey::new(base() + Days::new(offset))
}

/// Sequence of toggles inside June 2025.
fn toggles() -> impl Strategy<Value = Vec<(u64, usize)>> {
    prop::collection::vec((0u64..30, 0usize..HABITS.len()), 0..120)
}

fn build(toggles: &[(u64, usize)]) -> ProgressRecord {
    let mut record = ProgressRecord::new();
    for &(offset, habit) in toggles {
        record.toggle(day(offset), HABITS[habit]);
    }
    record
}

proptest! {
    #[test]
    fn prop_toggle_twice_is_identity(toggles in toggles(), offset in 0u64..30, habit in 0usize..4) {
        let mut record = build(&toggles);
        let before = record.clone();
        record.toggle(day(offset), HABITS[habit]);
        record.toggle(day(offset), HABITS[habit]);
        prop_assert_eq!(record, before);
    }

    #[test]
    fn prop_compact_is_idempotent(
        flags in prop::collection::btree_map(
            0u64..30,
            prop::collection::btree_map(0usize..4, prop::option::of(any::<bool>()), 0..4),
            0..20,
        )
    ) {
        let raw: serde_json::Map<String, serde_json::Value> = flags
            .iter()
            .map(|(offset, habits)| {
                let habits: serde_json::Map<String, serde_json::Value> = habits
                    .iter()
                    .map(|(h, v)| (HABITS[*h].to_string(), serde_json::json!(v)))
                    .collect();
                (day(*offset).to_string(), serde_json::Value::Object(habits))
            })
            .collect();
        let mut record: ProgressRecord = serde_json::from_value(serde_json::Value::Object(raw)).unwrap();
        let total = record.total_completions();

        record.compact();
        let once = record.clone();
        prop_assert!(!record.compact().changed());
        prop_assert_eq!(&record, &once);
        prop_assert_eq!(record.total_completions(), total);
        for (_, habits) in record.iter() {
            prop_assert!(!habits.is_empty());
            prop_assert!(habits.values().all(|done| *done));
        }
    }

    #[test]
    fn prop_scores_are_bounded_and_sorted(toggles in toggles()) {
        let record = build(&toggles);
        let habits = HabitList::seeded(&HABITS);
        let month: MonthKey = "2025-06".parse().unwrap();
        let ranking = rank_habits(&record, &habits, month);

        prop_assert_eq!(ranking.entries.len(), HABITS.len());
        for entry in &ranking.entries {
            prop_assert!((0.0..=100.0).contains(&entry.score));
        }
        for pair in ranking.entries.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn prop_current_streak_never_exceeds_max(toggles in toggles(), today in 0u64..31) {
        let record = build(&toggles);
        let streak = StreakEngine::new(&record, day(today)).streak().unwrap();
        prop_assert!(streak.current <= streak.max);
    }
}
