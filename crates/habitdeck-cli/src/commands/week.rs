//! Week grid: one row per habit, one column per day, Monday first.

use habitdeck_core::calendar::{is_current_week, shift_week};
use habitdeck_core::DayKey;
use serde::Serialize;

use crate::common::{day_or_today, print_json, CliResult, Session};

#[derive(Serialize)]
struct WeekDay {
    date: DayKey,
    weekday: String,
    /// Only today's column accepts toggles.
    locked: bool,
    completions: usize,
}

#[derive(Serialize)]
struct HabitRow {
    habit: String,
    done: Vec<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekGrid {
    current_week: bool,
    days: Vec<WeekDay>,
    habits: Vec<HabitRow>,
}

pub fn run(date: Option<&str>, shift: Option<i64>) -> CliResult {
    let session = Session::open_read_only()?;
    let tracker = &session.tracker;
    let today = tracker.today();

    let mut selected = day_or_today(date, tracker)?.date();
    if let Some(weeks) = shift {
        selected = shift_week(selected, weeks * 7, today.date())
            .ok_or("cannot move into a future week")?;
    }

    let dates = tracker.week_dates(selected);
    let days = dates
        .iter()
        .map(|&day| WeekDay {
            date: day,
            weekday: day.date().format("%a").to_string(),
            locked: day != today,
            completions: tracker.completions_on(day),
        })
        .collect();
    let habits = tracker
        .habits()
        .iter()
        .map(|habit| HabitRow {
            habit: habit.to_string(),
            done: dates.iter().map(|&day| tracker.is_done(day, habit)).collect(),
        })
        .collect();

    print_json(&WeekGrid {
        current_week: is_current_week(selected, today.date()),
        days,
        habits,
    })
}
