//! Manual cloud sync.

use clap::Subcommand;
use habitdeck_core::sync::SyncOutcome;
use habitdeck_core::SyncGateway;

use crate::common::{print_json, runtime, CliResult, Session};

#[derive(Subcommand)]
pub enum SyncAction {
    /// Push the full local state to the configured endpoint now
    Push,
}

pub fn run(action: SyncAction) -> CliResult {
    let session = Session::open()?;
    let sync = &session.config.sync;

    match action {
        SyncAction::Push => {
            let payload = session
                .tracker
                .sync_payload(sync.identity(), &sync.timezone)?;
            let gateway = SyncGateway::new(&sync.endpoint, sync.timeout())?;
            runtime()?.block_on(gateway.push(&payload))?;
            tracing::info!(endpoint = %gateway.endpoint(), "pushed local state");
            print_json(&SyncOutcome::Synced)?;
        }
    }
    Ok(())
}
