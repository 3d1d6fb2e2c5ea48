//! Month-rollover archival.
//!
//! When the stored active month differs from today's month, the progress
//! record is snapshotted into the history archive together with the habit
//! list and a summary, and the record starts over empty.

mod history;
mod rollover;

pub use history::{ArchiveEntry, HistoryArchive};
pub use rollover::{check_month_change, check_new_week, snapshot_month, MonthCheck};
