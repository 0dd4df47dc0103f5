//! Config command handlers.

use anyhow::{Context, Result};
use cwala_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let target = paths::config_path();
    Config::init(&target).with_context(|| format!("init config at {}", target.display()))?;
    println!("Wrote default config to {}", target.display());
    Ok(())
}
