//! ISO week helpers and bounded week/month navigation.

use chrono::{Datelike, Duration, NaiveDate};

use super::keys::{DayKey, MonthKey};

/// Monday of the ISO week containing `date`. Sunday belongs to the week
/// that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = i64::from(date.weekday().num_days_from_monday());
    date - Duration::days(back)
}

/// Monday through Sunday of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [DayKey; 7] {
    let monday = week_start(date);
    std::array::from_fn(|i| DayKey::new(monday + Duration::days(i as i64)))
}

pub fn is_current_week(date: NaiveDate, today: NaiveDate) -> bool {
    week_start(date) == week_start(today)
}

/// Move the selected date by `offset_days`.
///
/// Moving forward past `today` is refused; moving back is always allowed.
pub fn shift_week(selected: NaiveDate, offset_days: i64, today: NaiveDate) -> Option<NaiveDate> {
    let moved = selected.checked_add_signed(Duration::days(offset_days))?;
    if offset_days > 0 && moved > today {
        return None;
    }
    Some(moved)
}

/// Move the viewed month by `delta` months, refusing months after today's.
pub fn shift_month(viewing: MonthKey, delta: i32, today: NaiveDate) -> Option<MonthKey> {
    let mut month = viewing;
    for _ in 0..delta.unsigned_abs() {
        month = if delta > 0 { month.next()? } else { month.prev()? };
    }
    if month > MonthKey::of(today) {
        return None;
    }
    Some(month)
}
