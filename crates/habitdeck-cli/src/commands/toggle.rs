use crate::common::{day_or_today, CliResult, Session};

/// Flip one habit. Any day other than today is refused with a lock error.
pub fn run(habit: &str, date: Option<&str>) -> CliResult {
    let mut session = Session::open()?;
    let day = day_or_today(date, &session.tracker)?;
    let event = session.tracker.toggle(day, habit)?;
    session.commit(&event)
}
