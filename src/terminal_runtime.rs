use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the front end.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the terminal teardown on drop unless released first.
///
/// Armed as soon as raw mode is on; any later setup failure unwinds to
/// a usable shell.
struct ResetOnDrop {
    armed: bool,
}

impl ResetOnDrop {
    fn armed() -> Self {
        Self { armed: true }
    }

    fn release(mut self) {
        self.armed = false;
    }
}

impl Drop for ResetOnDrop {
    fn drop(&mut self) {
        if self.armed {
            reset_terminal();
        }
    }
}

/// Owns the terminal (raw mode + alternate screen) for one play session
/// and restores it when dropped.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode and the alternate screen, hides the cursor, and
    /// wraps stdout in a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = ResetOnDrop::armed();

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        guard.release();
        Ok(Self { terminal })
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        reset_terminal();
    }
}

/// Restores the terminal before the default hook prints, so panic
/// messages land on a readable screen instead of the alternate one.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        reset_terminal();
        default_hook(panic_info);
    }));
}

fn reset_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
