//! Tracing setup.
//!
//! Logs go to `<base>/logs/cwala.log`, never to the terminal, so the
//! dashboard can own stdout/stderr. The `CWALA_LOG` env var overrides the
//! default filter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

/// Log file name inside the logs directory.
const LOG_FILE: &str = "cwala.log";

/// Default filter when CWALA_LOG is unset.
const DEFAULT_FILTER: &str = "cwala=info,cwala_core=info,cwala_tui=info";

/// Initializes tracing with a non-blocking file writer.
///
/// The returned guard must be held for the lifetime of the process;
/// dropping it flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn init() -> Result<WorkerGuard> {
    init_at(&paths::logs_dir())
}

/// Initializes tracing, writing to `<logs_dir>/cwala.log`.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn init_at(logs_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("CWALA_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    /// init_at creates the log directory and installs the subscriber.
    /// Single test since the global subscriber can only be set once.
    #[test]
    fn test_init_creates_log_dir() {
        let dir = tempdir().unwrap();
        let logs_dir = dir.path().join("logs");

        let guard = init_at(&logs_dir).unwrap();
        assert!(logs_dir.exists());

        tracing::info!("logging initialized");
        drop(guard);

        assert!(logs_dir.join("cwala.log").exists());
    }
}
