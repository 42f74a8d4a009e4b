use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type ScreenTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Leave raw mode and the alternate screen; safe to call more than once
fn restore_screen() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Raw-mode alternate screen for the lookup UI, restored on drop (including unwinding)
pub struct TerminalGuard {
    terminal: ScreenTerminal,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("Failed to initialize terminal")?;

        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut ScreenTerminal {
        &mut self.terminal
    }

    /// Restore the screen, reporting failures (drop ignores them)
    pub fn restore(self) -> Result<()> {
        restore_screen().context("Failed to restore terminal")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_screen();
    }
}
