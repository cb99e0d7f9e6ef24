use crossterm::{cursor, event, execute, style, terminal};
use log::debug;
use std::io::{self, Stdout, Write};

/// Raw mode, alternate screen and mouse capture for the lifetime of the guard.
///
/// Everything is restored on drop, including after an error or panic unwind.
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        debug!("terminal session started");
        Ok(TerminalSession { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        execute!(
            self.out,
            style::ResetColor,
            event::DisableMouseCapture,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )
        .ok();
        terminal::disable_raw_mode().ok();
        self.out.flush().ok();
        debug!("terminal session restored");
    }
}
