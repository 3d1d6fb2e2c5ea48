use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Habits a fresh install starts with.
pub const DEFAULT_HABITS: [&str; 3] = ["Wakeup 5:00 AM", "DSA Solving", "ML Algorithm"];

/// Ordered, unique habit names. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HabitList(Vec<String>);

impl HabitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list used when nothing has been persisted yet.
    pub fn seeded<S: AsRef<str>>(seed: &[S]) -> Self {
        seed.iter().map(|s| s.as_ref().to_string()).collect::<Vec<_>>().into()
    }

    /// Append a habit. The name is trimmed; blank and duplicate names are
    /// rejected.
    pub fn add(&mut self, name: &str) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyInput("habit name".into()));
        }
        if self.contains(name) {
            return Err(ValidationError::DuplicateHabit(name.into()));
        }
        self.0.push(name.to_string());
        Ok(name.to_string())
    }

    /// Remove a habit by name. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|h| h != name);
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|h| h == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for HabitList {
    /// Keeps the first occurrence of each name.
    fn from(names: Vec<String>) -> Self {
        let mut list: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !list.contains(&name) {
                list.push(name);
            }
        }
        HabitList(list)
    }
}

impl From<HabitList> for Vec<String> {
    fn from(list: HabitList) -> Self {
        list.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_rejects_blank() {
        let mut habits = HabitList::new();
        assert_eq!(habits.add("  Read  ").unwrap(), "Read");
        assert_eq!(
            habits.add("   "),
            Err(ValidationError::EmptyInput("habit name".into()))
        );
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn add_rejects_duplicates() {
        let mut habits = HabitList::seeded(&DEFAULT_HABITS);
        assert!(matches!(
            habits.add("DSA Solving"),
            Err(ValidationError::DuplicateHabit(_))
        ));
        assert_eq!(habits.len(), 3);
    }

    #[test]
    fn remove_keeps_order() {
        let mut habits = HabitList::seeded(&["A", "B", "C"]);
        assert!(habits.remove("B"));
        assert!(!habits.remove("B"));
        assert_eq!(habits.iter().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn deserialize_dedupes_preserving_first() {
        let habits: HabitList = serde_json::from_str(r#"["A","B","A"]"#).unwrap();
        assert_eq!(habits.as_slice(), &["A".to_string(), "B".to_string()]);
        assert_eq!(serde_json::to_string(&habits).unwrap(), r#"["A","B"]"#);
    }
}
