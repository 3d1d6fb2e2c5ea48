//! Daily note commands for CLI.

use std::sync::Arc;

use clap::Subcommand;
use habitdeck_core::storage::Database;
use habitdeck_core::{DayKey, NoteAutosave, NoteStore};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::{day_or_today, print_json, runtime, CliResult, Session};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Print the note for a day
    Get {
        /// Day (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace the note for today or an earlier day; empty text deletes it
    Set {
        /// Note text
        text: String,
        /// Day (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Read the note from stdin, autosaving after each pause in input
    Write {
        /// Day (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
struct NoteView<'a> {
    date: DayKey,
    text: Option<&'a str>,
}

pub fn run(action: NoteAction) -> CliResult {
    let mut session = match action {
        NoteAction::Get { .. } => Session::open_read_only()?,
        _ => Session::open()?,
    };

    match action {
        NoteAction::Get { date } => {
            let day = day_or_today(date.as_deref(), &session.tracker)?;
            print_json(&NoteView {
                date: day,
                text: session.tracker.state().notes.get(day),
            })?;
        }
        NoteAction::Set { text, date } => {
            let day = day_or_today(date.as_deref(), &session.tracker)?;
            let event = session.tracker.set_note(day, &text)?;
            session.commit(&event)?;
        }
        NoteAction::Write { date } => {
            let day = day_or_today(date.as_deref(), &session.tracker)?;
            session.tracker.check_note_day(day)?;
            let text = write_from_stdin(day, &session)?;
            let event = session.tracker.set_note(day, &text)?;
            session.commit(&event)?;
        }
    }
    Ok(())
}

/// Feed stdin line by line into the debounced autosave and return the
/// final text once input ends.
fn write_from_stdin(day: DayKey, session: &Session) -> CliResult<String> {
    let store = Arc::new(NoteStore::new(Database::open()?));
    let delay = session.config.notes.autosave_delay();

    runtime()?.block_on(async move {
        let mut autosave = NoteAutosave::new(store, delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut text = String::new();
        while let Some(line) = lines.next_line().await? {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
            autosave.input(day, text.clone());
        }
        if autosave.flush()? {
            tracing::debug!(%day, "flushed unsaved draft");
        }
        Ok::<_, Box<dyn std::error::Error>>(text)
    })
}
