//! Names of the persisted state keys.

pub const HABITS: &str = "myHabits";
pub const PROGRESS: &str = "progressData";
pub const NOTES: &str = "dailyNotes";
pub const HISTORY: &str = "habitHistory";
/// Plain "YYYY-MM" text, not JSON.
pub const ACTIVE_MONTH: &str = "activeMonthKey";
/// Plain "YYYY-MM-DD" text, not JSON.
pub const ACTIVE_WEEK_MONDAY: &str = "activeWeekMonday";
