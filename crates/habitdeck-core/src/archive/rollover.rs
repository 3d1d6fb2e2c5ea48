//! Month rollover and week marker maintenance.
//!
//! The rollover sequence runs against `&mut TrackerState`, so no toggle can
//! land between the snapshot and the reset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::history::ArchiveEntry;
use crate::calendar::{week_start, DayKey, MonthKey};
use crate::error::{CoreError, Result};
use crate::state::TrackerState;
use crate::stats::{summarize_month, MonthSummary};

/// What a month check did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MonthCheck {
    /// No marker was stored; it now holds the current month.
    Started { month: MonthKey },
    /// The marker already holds the current month.
    Unchanged,
    /// The marker is later than today's month (the clock went back).
    /// Nothing is archived and the marker stays where it is.
    ClockBehind { active: MonthKey, today: MonthKey },
    /// The outgoing month was archived and the record cleared.
    Archived {
        month: MonthKey,
        next: MonthKey,
        summary: MonthSummary,
    },
}

/// Build the archive snapshot for `month` from the live record and habits.
pub fn snapshot_month(state: &TrackerState, month: MonthKey) -> ArchiveEntry {
    ArchiveEntry {
        data: state.progress.clone(),
        habits: state.habits.clone(),
        summary: summarize_month(&state.progress, state.habits.len(), month.days_in_month()),
    }
}

/// Archive the outgoing month if `today` is in a later one.
///
/// A marker later than `today`'s month is left alone: archiving it would
/// store a month that has not ended, and moving the marker back would make
/// the next forward check collide with that archive.
///
/// In order: summarize, archive, clear the record, advance the marker.
///
/// # Errors
/// [`CoreError::ArchiveConflict`] when the outgoing month is already
/// archived; the state is left untouched in that case.
pub fn check_month_change(state: &mut TrackerState, today: NaiveDate) -> Result<MonthCheck> {
    let current = MonthKey::of(today);

    let outgoing = match state.active_month {
        None => {
            state.active_month = Some(current);
            return Ok(MonthCheck::Started { month: current });
        }
        Some(stored) if stored == current => return Ok(MonthCheck::Unchanged),
        Some(stored) if stored > current => {
            tracing::warn!(active = %stored, today = %current, "clock is behind the active month");
            return Ok(MonthCheck::ClockBehind {
                active: stored,
                today: current,
            });
        }
        Some(stored) => stored,
    };

    if state.history.contains(outgoing) {
        return Err(CoreError::ArchiveConflict(outgoing));
    }

    let entry = snapshot_month(state, outgoing);
    let summary = entry.summary;
    state.history.insert(outgoing, entry)?;
    state.progress.clear();
    state.active_month = Some(current);

    tracing::info!(
        month = %outgoing,
        next = %current,
        total = summary.total_completions,
        rate = summary.success_rate,
        "archived month"
    );

    Ok(MonthCheck::Archived {
        month: outgoing,
        next: current,
        summary,
    })
}

/// Keep the stored week marker on the Monday of today's week.
///
/// Returns the new Monday when the marker changed.
pub fn check_new_week(state: &mut TrackerState, today: NaiveDate) -> Option<DayKey> {
    let monday = DayKey::new(week_start(today));
    if state.active_week_monday == Some(monday) {
        return None;
    }
    state.active_week_monday = Some(monday);
    Some(monday)
}
