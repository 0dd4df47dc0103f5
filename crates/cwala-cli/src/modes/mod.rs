//! Runtime execution modes.
//!
//! - subcommands: non-interactive session/config management (stdout)
//! - `tui`: full-screen interactive dashboard (optional feature)

#[cfg(feature = "tui")]
pub use cwala_tui::run_dashboard;

#[cfg(not(feature = "tui"))]
pub async fn run_dashboard(
    _config: &cwala_core::config::Config,
    _cache: cwala_core::session::SessionCache,
) -> anyhow::Result<()> {
    anyhow::bail!("Dashboard support is disabled in this build (feature \"tui\").");
}
