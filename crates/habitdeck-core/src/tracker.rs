//! Habit tracker controller.
//!
//! [`HabitTracker`] is the single owner of a [`TrackerState`]. Every mutation
//! goes through it and returns an [`Event`]; the derived views are plain
//! reads a presentation layer polls afterwards.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = HabitTracker::new(state, Box::new(SystemClock));
//! tracker.check_month_change()?;
//! tracker.toggle(tracker.today(), "Read")?;
//! let streak = tracker.streak()?;
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};

use crate::archive::{self, MonthCheck};
use crate::calendar::{week_dates, Clock, DayKey, MonthKey};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::progress::{CompactReport, HabitList};
use crate::state::TrackerState;
use crate::stats::{
    activity_series, daily_progress, rank_habits, summarize_month, ActivityPoint, DailyProgress,
    MonthSummary, MonthlyRanking, Streak, StreakEngine, DEFAULT_MAX_LOOKBACK_DAYS,
};
use crate::sync::{SyncError, SyncPayload};

pub struct HabitTracker {
    state: TrackerState,
    clock: Box<dyn Clock>,
    max_lookback_days: u32,
}

impl HabitTracker {
    pub fn new(state: TrackerState, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback(mut self, days: u32) -> Self {
        self.max_lookback_days = days;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn into_state(self) -> TrackerState {
        self.state
    }

    pub fn habits(&self) -> &HabitList {
        &self.state.habits
    }

    pub fn today(&self) -> DayKey {
        DayKey::new(self.clock.today())
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::of(self.clock.today())
    }

    pub fn week_dates(&self, selected: NaiveDate) -> [DayKey; 7] {
        week_dates(selected)
    }

    pub fn completions_on(&self, day: DayKey) -> usize {
        self.state.progress.completions_on(day)
    }

    pub fn is_done(&self, day: DayKey, habit: &str) -> bool {
        self.state.progress.is_done(day, habit)
    }

    pub fn streak(&self) -> Result<Streak> {
        StreakEngine::new(&self.state.progress, self.today())
            .with_lookback(self.max_lookback_days)
            .streak()
    }

    /// Ranking for the current calendar month.
    pub fn ranking(&self) -> MonthlyRanking {
        rank_habits(&self.state.progress, &self.state.habits, self.current_month())
    }

    pub fn daily_progress(&self) -> DailyProgress {
        daily_progress(&self.state.progress, &self.state.habits, self.today())
    }

    /// Summary of the month in progress.
    pub fn month_summary(&self) -> MonthSummary {
        summarize_month(
            &self.state.progress,
            self.state.habits.len(),
            self.current_month().days_in_month(),
        )
    }

    /// Per-day completions for `month`: the live record for the current
    /// month, the archive for earlier ones, zeros when neither has data.
    pub fn activity_series(&self, month: MonthKey) -> Vec<ActivityPoint> {
        if month == self.current_month() {
            return activity_series(&self.state.progress, month);
        }
        match self.state.history.get(month) {
            Some(entry) => activity_series(&entry.data, month),
            None => activity_series(&Default::default(), month),
        }
    }

    /// Full-state snapshot for the sync gateway.
    pub fn sync_payload(
        &self,
        email: Option<&str>,
        timezone: &str,
    ) -> std::result::Result<SyncPayload, SyncError> {
        SyncPayload::from_state(&self.state, email, timezone)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Flip `habit` on `day`.
    ///
    /// # Errors
    /// [`CoreError::LockViolation`] unless `day` is today;
    /// [`CoreError::StaleMonth`] if the record belongs to another month;
    /// [`ValidationError::UnknownHabit`] if the habit is not in the list.
    /// The record is unchanged on error.
    pub fn toggle(&mut self, day: DayKey, habit: &str) -> Result<Event> {
        let today = self.today();
        if day != today {
            return Err(CoreError::LockViolation {
                attempted: day,
                today,
            });
        }
        if let Some(active) = self.state.active_month {
            if active != today.month() {
                return Err(CoreError::StaleMonth {
                    active,
                    today: today.month(),
                });
            }
        }
        if !self.state.habits.contains(habit) {
            return Err(ValidationError::UnknownHabit(habit.to_string()).into());
        }

        let done = self.state.progress.toggle(day, habit);
        tracing::debug!(%day, habit, done, "habit toggled");
        Ok(Event::HabitToggled {
            day,
            habit: habit.to_string(),
            done,
            at: Utc::now(),
        })
    }

    pub fn add_habit(&mut self, name: &str) -> Result<Event> {
        let habit = self.state.habits.add(name)?;
        tracing::debug!(habit = %habit, "habit added");
        Ok(Event::HabitAdded {
            habit,
            at: Utc::now(),
        })
    }

    /// Delete a habit and its flags on every day.
    pub fn remove_habit(&mut self, name: &str) -> Result<Event> {
        if !self.state.habits.remove(name) {
            return Err(ValidationError::UnknownHabit(name.to_string()).into());
        }
        let cleared_days = self.state.progress.remove_habit(name);
        tracing::debug!(habit = name, cleared_days, "habit removed");
        Ok(Event::HabitRemoved {
            habit: name.to_string(),
            cleared_days,
            at: Utc::now(),
        })
    }

    /// Notes can be written for today and earlier days.
    pub fn check_note_day(&self, day: DayKey) -> Result<()> {
        if day > self.today() {
            return Err(ValidationError::FutureDay(day).into());
        }
        Ok(())
    }

    pub fn set_note(&mut self, day: DayKey, text: &str) -> Result<Event> {
        self.check_note_day(day)?;
        self.state.notes.set(day, text);
        Ok(Event::NoteSaved {
            day,
            at: Utc::now(),
        })
    }

    /// Run the month rollover against today's date.
    ///
    /// Returns `None` when nothing changed.
    pub fn check_month_change(&mut self) -> Result<Option<Event>> {
        let today = self.clock.today();
        let event = match archive::check_month_change(&mut self.state, today)? {
            MonthCheck::Unchanged | MonthCheck::ClockBehind { .. } => None,
            MonthCheck::Started { month } => Some(Event::MonthStarted {
                month,
                at: Utc::now(),
            }),
            MonthCheck::Archived {
                month,
                next,
                summary,
            } => Some(Event::MonthArchived {
                month,
                next,
                summary,
                at: Utc::now(),
            }),
        };
        Ok(event)
    }

    pub fn check_new_week(&mut self) -> Option<Event> {
        archive::check_new_week(&mut self.state, self.clock.today()).map(|monday| {
            Event::WeekStarted {
                monday,
                at: Utc::now(),
            }
        })
    }

    /// Remove ghost entries. Returns an event only when something changed.
    pub fn compact(&mut self) -> Option<Event> {
        let CompactReport {
            removed_flags,
            removed_days,
        } = self.state.progress.compact();
        if removed_flags == 0 && removed_days == 0 {
            return None;
        }
        tracing::info!(removed_flags, removed_days, "compacted progress record");
        Some(Event::Compacted {
            removed_flags,
            removed_days,
            at: Utc::now(),
        })
    }

    /// Startup sequence: month rollover, week marker, compaction.
    pub fn startup(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        events.extend(self.check_month_change()?);
        events.extend(self.check_new_week());
        events.extend(self.compact());
        Ok(events)
    }
}

/// A tracker shared between threads.
///
/// Each method holds the lock for its whole operation, so a month rollover
/// and a toggle can never interleave.
#[derive(Clone)]
pub struct SharedTracker {
    inner: Arc<Mutex<HabitTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: HabitTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, HabitTracker> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn toggle(&self, day: DayKey, habit: &str) -> Result<Event> {
        self.lock().toggle(day, habit)
    }

    pub fn check_month_change(&self) -> Result<Option<Event>> {
        self.lock().check_month_change()
    }

    /// Copy of the current state, e.g. for persisting or syncing.
    pub fn snapshot(&self) -> TrackerState {
        self.lock().state().clone()
    }
}
