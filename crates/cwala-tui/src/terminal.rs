//! Terminal lifecycle management.
//!
//! Raw mode, the alternate screen and bracketed paste are enabled
//! together and must be unwound together. Restore runs on normal exit
//! (via Drop), on panic, and on Ctrl+C, which raw mode delivers as a
//! plain key event.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Puts the terminal into dashboard mode and hands back the ratatui handle.
///
/// Raw mode first, then the alternate screen and bracketed paste in one
/// batch. Call `install_panic_hook()` before this so a panic mid-setup
/// still restores what was already enabled.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Returns the terminal to shell mode.
///
/// Bracketed paste goes first, while raw mode is still on; then the
/// alternate screen, then raw mode itself. Idempotent, so the Drop impl
/// and the panic hook can both call it.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Chains a terminal restore in front of the default panic handler so a
/// panic never leaves the shell in raw mode.
///
/// Install BEFORE `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
