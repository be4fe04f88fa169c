use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Puts the terminal back the way it was found when dropped.
///
/// Created as soon as raw mode is on, so a failure anywhere later in setup
/// still restores the terminal.
struct RestoreOnDrop {
    keyboard_enhanced: bool,
}

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        let _ = write_restore(&mut io::stdout(), self.keyboard_enhanced);
        let _ = disable_raw_mode();
    }
}

/// Raw-mode, alternate-screen terminal with mouse capture.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    restore: RestoreOnDrop,
}

impl TerminalGuard {
    pub fn new(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let mut restore = RestoreOnDrop {
            keyboard_enhanced: false,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;
        // Needed to tell Ctrl+Enter and Shift+Enter apart from Enter
        restore.keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .is_ok();

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, restore })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.restore.keyboard_enhanced
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
        &mut self.terminal
    }
}

/// Undo everything `TerminalGuard::new` may have turned on, except raw mode.
fn write_restore(out: &mut impl Write, keyboard_enhanced: bool) -> io::Result<()> {
    if keyboard_enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, DisableMouseCapture, LeaveAlternateScreen, Show)
}
