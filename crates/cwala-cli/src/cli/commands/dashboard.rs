//! Dashboard command handler (the default mode).

use anyhow::{Context, Result};
use cwala_core::config::Config;
use cwala_core::logging;
use cwala_core::session::SessionCache;

use crate::modes;

pub async fn run(config: &Config) -> Result<()> {
    // Logs go to a file so the TUI owns the terminal. The guard flushes
    // on drop, after the dashboard exits.
    let _log_guard = logging::init().context("initialize logging")?;

    // An unreadable session file must not lock the user out of the
    // login screen.
    let cache = SessionCache::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "session file unreadable, starting signed out");
        SessionCache::default()
    });

    modes::run_dashboard(config, cache)
        .await
        .context("dashboard failed")?;

    Ok(())
}
