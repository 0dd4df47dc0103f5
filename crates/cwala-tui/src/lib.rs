//! Full-screen terminal dashboard for Campaignwala.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use cwala_core::api::resolve_base_url;
use cwala_core::config::Config;
use cwala_core::session::SessionCache;
pub use runtime::TuiRuntime;

/// Runs the interactive dashboard until the user quits.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn run_dashboard(config: &Config, cache: SessionCache) -> Result<()> {
    // The dashboard needs a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `cwala whoami` for non-interactive session info."
        );
    }

    // Printed before the alternate screen goes up; visible again on exit.
    let mut err = stderr();
    writeln!(err, "Campaignwala Dashboard")?;
    writeln!(err, "Server: {}", resolve_base_url(config))?;
    if let Some(user) = &cache.user {
        writeln!(err, "Resuming session for {}", user.email)?;
    }
    err.flush()?;

    // Create and run the TUI
    let mut runtime = TuiRuntime::new(config.clone(), cache)?;
    runtime.run()?;

    // By now the terminal is restored, so this prints normally.
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
