use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calendar::DayKey;

/// Free-text note per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyNotes(BTreeMap<DayKey, String>);

impl DailyNotes {
    pub fn get(&self, day: DayKey) -> Option<&str> {
        self.0.get(&day).map(String::as_str)
    }

    /// Store the note for `day`. Blank text removes it.
    pub fn set(&mut self, day: DayKey, text: &str) {
        if text.trim().is_empty() {
            self.0.remove(&day);
        } else {
            self.0.insert(day, text.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &str)> {
        self.0.iter().map(|(day, text)| (*day, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_note_removes_entry() {
        let day: DayKey = "2025-06-03".parse().unwrap();
        let mut notes = DailyNotes::default();
        notes.set(day, "ran 5k");
        assert_eq!(notes.get(day), Some("ran 5k"));
        notes.set(day, "  ");
        assert!(notes.is_empty());
    }
}
