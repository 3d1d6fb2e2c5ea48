//! Day and month keys.
//!
//! Both keys serialize as plain strings so they can be used directly as
//! JSON object keys in the persisted progress and history maps.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Canonical "YYYY-MM-DD" identifier for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The month this day belongs to.
    pub fn month(self) -> MonthKey {
        MonthKey::of(self.0)
    }

    /// The previous calendar day, `None` at the start of chrono's range.
    pub fn pred(self) -> Option<DayKey> {
        self.0.pred_opt().map(DayKey)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: DayKey) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

/// Format a calendar date as a day key.
pub fn day_key(date: NaiveDate) -> DayKey {
    DayKey(date)
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDayKey(s.to_string());
        // chrono accepts unpadded fields; keys must be canonical
        if s.len() != 10 {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(s, DAY_FORMAT).map_err(|_| invalid())?;
        Ok(DayKey(date))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Canonical "YYYY-MM" identifier for a calendar month.
///
/// Stored as the first day of the month so every value is a real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        // day 1 exists in every month chrono can represent
        MonthKey(date.with_day(1).unwrap_or(date))
    }

    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(MonthKey)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Number of days in this month (28-31).
    pub fn days_in_month(self) -> u32 {
        match self.0.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.0).num_days() as u32,
            None => 31,
        }
    }

    pub fn contains(self, day: DayKey) -> bool {
        MonthKey::of(day.date()) == self
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(MonthKey)
    }

    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(MonthKey)
    }

    /// All day keys of the month, in order.
    pub fn days(self) -> impl Iterator<Item = DayKey> {
        let first = self.0;
        (0..self.days_in_month()).filter_map(move |offset| {
            first
                .checked_add_days(chrono::Days::new(u64::from(offset)))
                .map(DayKey)
        })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::from_ym(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
