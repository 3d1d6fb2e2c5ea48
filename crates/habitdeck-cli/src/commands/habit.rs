//! Habit list management commands for CLI.

use clap::Subcommand;
use serde::Serialize;

use crate::common::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with today's flags
    List,
    /// Add a habit
    Add {
        /// Habit name (surrounding whitespace is trimmed)
        name: String,
    },
    /// Remove a habit and its flags on every day
    Remove {
        /// Habit name
        name: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitRow<'a> {
    habit: &'a str,
    done_today: bool,
}

pub fn run(action: HabitAction) -> CliResult {
    let mut session = match action {
        HabitAction::List => Session::open_read_only()?,
        _ => Session::open()?,
    };

    match action {
        HabitAction::List => {
            let today = session.tracker.today();
            let rows: Vec<_> = session
                .tracker
                .habits()
                .iter()
                .map(|habit| HabitRow {
                    habit,
                    done_today: session.tracker.is_done(today, habit),
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Add { name } => {
            let event = session.tracker.add_habit(&name)?;
            session.commit(&event)?;
        }
        HabitAction::Remove { name } => {
            let event = session.tracker.remove_habit(&name)?;
            session.commit(&event)?;
        }
    }
    Ok(())
}
