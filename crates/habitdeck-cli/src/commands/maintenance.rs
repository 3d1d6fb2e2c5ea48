use clap::Subcommand;
use habitdeck_core::Event;

use crate::common::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum MaintenanceAction {
    /// Drop unchecked flags and empty days from the progress record
    Compact,
}

pub fn run(action: MaintenanceAction) -> CliResult {
    let mut session = Session::open_read_only()?;

    match action {
        MaintenanceAction::Compact => {
            // every session compacts on open; report that pass if it did work
            let at_open = session
                .startup_events
                .iter()
                .find(|e| matches!(e, Event::Compacted { .. }))
                .cloned();
            match at_open.or_else(|| session.tracker.compact()) {
                Some(event) => {
                    session.save()?;
                    print_json(&event)?;
                }
                None => println!("nothing to compact"),
            }
        }
    }
    Ok(())
}
