//! Archived months and per-day activity.

use clap::Subcommand;
use habitdeck_core::calendar::shift_month;
use habitdeck_core::stats::MonthSummary;
use habitdeck_core::MonthKey;
use serde::Serialize;

use crate::common::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List archived months with their summaries
    List,
    /// Show one archived month in full
    Show {
        /// Month key (YYYY-MM)
        month: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArchivedMonth {
    month: MonthKey,
    habit_count: usize,
    summary: MonthSummary,
}

pub fn run(action: HistoryAction) -> CliResult {
    let session = Session::open_read_only()?;
    let history = &session.tracker.state().history;

    match action {
        HistoryAction::List => {
            let months: Vec<_> = history
                .iter()
                .map(|(month, entry)| ArchivedMonth {
                    month,
                    habit_count: entry.habits.len(),
                    summary: entry.summary,
                })
                .collect();
            print_json(&months)?;
        }
        HistoryAction::Show { month } => {
            let month: MonthKey = month.parse()?;
            let entry = history
                .get(month)
                .ok_or_else(|| format!("no archive for {month}"))?;
            print_json(entry)?;
        }
    }
    Ok(())
}

/// Completions per day for a month; archived months read from history.
pub fn activity(month: Option<&str>, shift: Option<i32>) -> CliResult {
    let session = Session::open_read_only()?;
    let tracker = &session.tracker;

    let mut month = match month {
        Some(raw) => raw.parse::<MonthKey>()?,
        None => tracker.current_month(),
    };
    if let Some(delta) = shift {
        month = shift_month(month, delta, tracker.today().date())
            .ok_or("cannot move into a future month")?;
    }
    if month > tracker.current_month() {
        return Err(format!("{month} is in the future").into());
    }

    print_json(&tracker.activity_series(month))
}
