use quotesync_core::services::{Intent, QuoteSession};

use crate::error::CliError;

pub async fn run_auto_sync(session: &QuoteSession, enabled: bool) -> Result<(), CliError> {
    let outcome = session.dispatch(Intent::SetAutoSync { enabled }).await?;

    let state = if outcome.view.settings.auto_sync_enabled {
        "on"
    } else {
        "off"
    };
    println!(
        "Auto sync {state} (every {}s while `quotes watch` runs)",
        session.config().sync_interval_secs
    );
    Ok(())
}
