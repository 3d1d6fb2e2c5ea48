use crate::common::{print_json, CliResult, Session};

/// Read-only views over the progress record.
pub enum StatsView {
    Progress,
    Streak,
    Ranking,
    Summary,
}

pub fn run(view: StatsView) -> CliResult {
    let session = Session::open_read_only()?;
    let tracker = &session.tracker;

    match view {
        StatsView::Progress => print_json(&tracker.daily_progress())?,
        StatsView::Streak => print_json(&tracker.streak()?)?,
        StatsView::Ranking => print_json(&tracker.ranking())?,
        StatsView::Summary => print_json(&tracker.month_summary())?,
    }
    Ok(())
}
