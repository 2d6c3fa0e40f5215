//! # Terminal Session
//!
//! [`TerminalSession`] is the single owner of the terminal's raw/cooked mode.
//! Acquiring it switches to raw mode and the alternate screen; dropping it
//! puts everything back, whether the screen returned normally, bailed out
//! with `?`, or panicked.
//!
//! Callers must check that stdin and stdout are both terminals before
//! acquiring a session (see [`is_interactive`]).

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Set while a session holds the terminal. Whoever clears it first (the
/// session or the panic hook) performs the one restore.
static RESTORE_PENDING: AtomicBool = AtomicBool::new(false);

fn arm_restore() {
    RESTORE_PENDING.store(true, Ordering::SeqCst);
}

fn claim_restore() -> bool {
    RESTORE_PENDING.swap(false, Ordering::SeqCst)
}

/// True when both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

pub struct TerminalSession {
    terminal: CrosstermTerminal,
}

impl TerminalSession {
    pub fn acquire() -> Result<Self> {
        enable_raw()?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            disable_raw();
            return Err(err).context("Failed to set up terminal");
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
                disable_raw();
                return Err(err).context("Failed to create terminal");
            }
        };

        arm_restore();
        tracing::debug!("terminal session acquired");
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }

    /// Put the terminal back into cooked mode. Runs at most once; later calls,
    /// the one from `Drop` and a restore already done by the panic hook all
    /// count. Failures are logged only.
    pub fn restore(&mut self) {
        if !claim_restore() {
            return;
        }

        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show) {
            tracing::warn!(error = %err, "failed to leave alternate screen");
        }
        disable_raw();
        tracing::debug!("terminal session restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Restore the terminal before the panic message is printed, so it lands on
/// the normal screen instead of the alternate one. Chains to the previous
/// hook. The session's `Drop` then finds nothing left to restore.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if claim_restore() {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
            disable_raw();
        }
        original_hook(panic_info);
    }));
}

#[cfg(not(windows))]
fn enable_raw() -> Result<()> {
    crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode for terminal")
}

#[cfg(not(windows))]
fn disable_raw() {
    if let Err(err) = crossterm::terminal::disable_raw_mode() {
        tracing::warn!(error = %err, "failed to disable raw mode");
    }
}

// Console key reads are already unbuffered on Windows.
#[cfg(windows)]
fn enable_raw() -> Result<()> {
    Ok(())
}

#[cfg(windows)]
fn disable_raw() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_is_claimed_once() {
        assert!(!claim_restore());
        arm_restore();
        assert!(claim_restore());
        assert!(!claim_restore());
    }
}
