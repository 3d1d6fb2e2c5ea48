//! End-to-end tracker scenarios driven by a fixed clock.

use chrono::NaiveDate;
use habitdeck_core::{
    CoreError, DayKey, Event, FixedClock, HabitTracker, MonthKey, SharedTracker, TrackerState,
    ValidationError,
};

fn date(s: &str) -> NaiveDate {
    s.parse::<DayKey>().unwrap().date()
}

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

fn tracker(habits: &[&str], today: &str) -> HabitTracker {
    HabitTracker::new(TrackerState::seeded(habits), Box::new(FixedClock(date(today))))
}

/// Rebuild the tracker on a later day, as a restart would.
fn restart(tracker: HabitTracker, today: &str) -> HabitTracker {
    HabitTracker::new(tracker.into_state(), Box::new(FixedClock(date(today))))
}

#[test]
fn test_three_consecutive_days_make_a_streak_of_three() {
    let mut t = tracker(&["A"], "2025-06-01");
    for today in ["2025-06-01", "2025-06-02", "2025-06-03"] {
        t = restart(t, today);
        t.toggle(t.today(), "A").unwrap();
    }

    let streak = t.streak().unwrap();
    assert_eq!(streak.current, 3);
    assert_eq!(streak.max, 3);
}

#[test]
fn test_current_streak_survives_an_untouched_today() {
    let mut t = tracker(&["A"], "2025-06-01");
    for today in ["2025-06-01", "2025-06-02"] {
        t = restart(t, today);
        t.toggle(t.today(), "A").unwrap();
    }
    let t = restart(t, "2025-06-03");
    assert_eq!(t.streak().unwrap().current, 2);

    let t = restart(t, "2025-06-04");
    assert_eq!(t.streak().unwrap().current, 0);
    assert_eq!(t.streak().unwrap().max, 2);
}

#[test]
fn test_ranking_scores_over_whole_month() {
    let mut t = tracker(&["A", "B"], "2025-06-01");
    for (today, habits) in [
        ("2025-06-01", &["A", "B"][..]),
        ("2025-06-02", &["A"][..]),
        ("2025-06-03", &["A", "B"][..]),
    ] {
        t = restart(t, today);
        for habit in habits {
            t.toggle(t.today(), habit).unwrap();
        }
    }
    // mid-month, the denominator is still all 30 days
    let t = restart(t, "2025-06-10");

    let ranking = t.ranking();
    assert_eq!(ranking.days_in_month, 30);
    let scores: Vec<_> = ranking
        .entries
        .iter()
        .map(|e| (e.habit.as_str(), e.score, e.rank))
        .collect();
    assert_eq!(scores, [("A", 10.0, 1), ("B", 6.7, 2)]);
}

#[test]
fn test_lock_violation_leaves_record_untouched() {
    let mut t = tracker(&["A"], "2025-06-03");
    let before = t.state().clone();

    let err = t.toggle(day("2025-06-02"), "A").unwrap_err();
    assert!(matches!(
        err,
        CoreError::LockViolation { attempted, today }
            if attempted == day("2025-06-02") && today == day("2025-06-03")
    ));
    assert!(t.toggle(day("2025-06-04"), "A").is_err());
    assert_eq!(t.state(), &before);
}

#[test]
fn test_month_rollover_archives_and_clears() {
    let mut t = tracker(&["A", "B", "C"], "2025-05-31");
    assert!(matches!(
        t.check_month_change().unwrap(),
        Some(Event::MonthStarted { .. })
    ));
    t.toggle(t.today(), "A").unwrap();
    t.toggle(t.today(), "B").unwrap();

    let mut t = restart(t, "2025-06-01");
    let event = t.check_month_change().unwrap().unwrap();
    let Event::MonthArchived {
        month,
        next,
        summary,
        ..
    } = event
    else {
        panic!("expected MonthArchived, got {event:?}");
    };
    assert_eq!(month, "2025-05".parse::<MonthKey>().unwrap());
    assert_eq!(next, "2025-06".parse::<MonthKey>().unwrap());
    assert_eq!(summary.total_completions, 2);

    assert_eq!(t.completions_on(day("2025-05-31")), 0);
    let archived = t.state().history.get(month).unwrap();
    assert_eq!(archived.data.completions_on(day("2025-05-31")), 2);
    assert_eq!(archived.habits.len(), 3);

    // Past month activity is served from the archive
    let series = t.activity_series(month);
    assert_eq!(series.len(), 31);
    assert_eq!(series[30].completed, 2);

    assert_eq!(t.check_month_change().unwrap(), None);
}

#[test]
fn test_rollover_conflict_keeps_state() {
    let mut t = tracker(&["A"], "2025-05-20");
    t.check_month_change().unwrap();
    t.toggle(t.today(), "A").unwrap();

    let mut t = restart(t, "2025-06-02");
    t.check_month_change().unwrap();
    t.toggle(t.today(), "A").unwrap();

    // Stored marker rewound by hand: May is already archived
    let mut state = t.into_state();
    state.active_month = Some("2025-05".parse().unwrap());
    let mut t = HabitTracker::new(state, Box::new(FixedClock(date("2025-06-02"))));
    let before = t.state().clone();

    assert!(matches!(
        t.check_month_change(),
        Err(CoreError::ArchiveConflict(m)) if m.to_string() == "2025-05"
    ));
    assert_eq!(t.state(), &before);
}

#[test]
fn test_clock_set_back_then_forward_keeps_working() {
    let mut t = tracker(&["A"], "2025-05-20");
    t.startup().unwrap();
    t.toggle(t.today(), "A").unwrap();

    let mut t = restart(t, "2025-06-02");
    t.startup().unwrap();
    t.toggle(t.today(), "A").unwrap();

    // Clock set back into May: views still load, writes are refused
    let mut t = restart(t, "2025-05-31");
    t.startup().unwrap();
    assert_eq!(t.state().active_month, Some("2025-06".parse().unwrap()));
    assert!(matches!(
        t.toggle(t.today(), "A"),
        Err(CoreError::StaleMonth { .. })
    ));
    assert_eq!(t.streak().unwrap().max, 1);

    let mut t = restart(t, "2025-06-03");
    t.startup().unwrap();
    t.toggle(t.today(), "A").unwrap();

    let mut t = restart(t, "2025-07-01");
    let events = t.startup().unwrap();
    assert!(matches!(events[0], Event::MonthArchived { month, .. } if month.to_string() == "2025-06"));
    assert_eq!(t.state().history.len(), 2);
    assert_eq!(
        t.state().history.get("2025-06".parse().unwrap()).unwrap().summary.total_completions,
        2
    );
}

#[test]
fn test_startup_runs_checks_in_order() {
    let mut state = TrackerState::seeded(&["A"]);
    state.active_month = Some("2025-05".parse().unwrap());
    state.progress = serde_json::from_str(r#"{"2025-05-30": {"A": false}}"#).unwrap();

    let mut t = HabitTracker::new(state, Box::new(FixedClock(date("2025-06-04"))));
    let events = t.startup().unwrap();

    assert!(matches!(events[0], Event::MonthArchived { .. }));
    assert!(matches!(events[1], Event::WeekStarted { monday, .. } if monday == day("2025-06-02")));
    // The archived snapshot keeps what was loaded; the live record is empty
    assert_eq!(events.len(), 2);
    assert!(t.startup().unwrap().is_empty());
}

#[test]
fn test_habit_management_cascades() {
    let mut t = tracker(&["A"], "2025-06-03");
    t.add_habit("B").unwrap();
    assert!(matches!(
        t.add_habit("B"),
        Err(CoreError::Validation(ValidationError::DuplicateHabit(_)))
    ));
    assert!(matches!(
        t.add_habit(" "),
        Err(CoreError::Validation(ValidationError::EmptyInput(_)))
    ));

    t.toggle(t.today(), "A").unwrap();
    t.toggle(t.today(), "B").unwrap();
    assert_eq!(t.daily_progress().percent, 100);

    let event = t.remove_habit("B").unwrap();
    assert!(matches!(event, Event::HabitRemoved { cleared_days: 1, .. }));
    assert!(!t.is_done(t.today(), "B"));
    assert_eq!(t.completions_on(t.today()), 1);
    assert!(t.remove_habit("B").is_err());
}

#[test]
fn test_shared_tracker_serializes_mutations() {
    let shared = SharedTracker::new(tracker(&["A", "B", "C", "D"], "2025-06-03"));
    let today = shared.lock().today();

    let handles: Vec<_> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|habit| {
            let shared = shared.clone();
            std::thread::spawn(move || shared.toggle(today, habit).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.snapshot().progress.completions_on(today), 4);
}
