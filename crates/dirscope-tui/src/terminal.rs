//! Terminal lifecycle management.
//!
//! A `TerminalSession` owns the writer the browser draws on and remembers
//! whether it switched to the alternate screen and raw mode. Leaving is
//! idempotent and also runs on drop, so every exit path restores the
//! terminal exactly once.

use std::io::{self, Write};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

pub struct TerminalSession<W: Write> {
    writer: W,
    alternate_screen: bool,
    raw_mode: bool,
    manage_raw_mode: bool,
}

impl<W: Write> TerminalSession<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            alternate_screen: false,
            raw_mode: false,
            manage_raw_mode: true,
        }
    }

    /// Session that only writes escape sequences and leaves the tty mode alone.
    #[cfg(test)]
    fn without_raw_mode(writer: W) -> Self {
        Self {
            writer,
            alternate_screen: false,
            raw_mode: false,
            manage_raw_mode: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.alternate_screen
    }

    /// Enables raw mode and switches to the alternate screen.
    ///
    /// Calling it on an active session does nothing.
    ///
    /// # Errors
    /// Returns an error if the terminal rejects either switch.
    pub fn enter(&mut self) -> Result<()> {
        if self.manage_raw_mode && !self.raw_mode {
            enable_raw_mode().context("Failed to enable raw mode")?;
            self.raw_mode = true;
        }
        if !self.alternate_screen {
            execute!(self.writer, EnterAlternateScreen, Hide)
                .context("Failed to enter alternate screen")?;
            self.alternate_screen = true;
        }
        Ok(())
    }

    /// Leaves the alternate screen and raw mode if this session entered them.
    ///
    /// # Errors
    /// Returns an error if the terminal could not be restored.
    pub fn leave(&mut self) -> Result<()> {
        if self.alternate_screen {
            self.alternate_screen = false;
            execute!(self.writer, Show, LeaveAlternateScreen)
                .context("Failed to leave alternate screen")?;
        }
        if self.raw_mode {
            self.raw_mode = false;
            disable_raw_mode().context("Failed to disable raw mode")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!("Failed to restore terminal: {err:#}");
        }
    }
}

/// Unconditionally restores the terminal on stderr.
///
/// Used from the panic hook, where the session object is out of reach.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stderr(), Show, LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this before `TerminalSession::enter`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTER: &[u8] = b"\x1b[?1049h";
    const LEAVE: &[u8] = b"\x1b[?1049l";

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    }

    #[test]
    fn test_enter_and_leave_are_idempotent() {
        let mut session = TerminalSession::without_raw_mode(Vec::new());
        session.enter().unwrap();
        session.enter().unwrap();
        assert!(session.is_active());
        session.leave().unwrap();
        session.leave().unwrap();
        assert!(!session.is_active());

        let out = session.writer_mut().clone();
        assert_eq!(count(&out, ENTER), 1);
        assert_eq!(count(&out, LEAVE), 1);
    }

    #[test]
    fn test_leave_without_enter_writes_nothing() {
        let mut session = TerminalSession::without_raw_mode(Vec::new());
        session.leave().unwrap();
        assert!(session.writer_mut().is_empty());
    }

    #[test]
    fn test_drop_restores_active_session() {
        let mut buffer = Vec::new();
        {
            let mut session = TerminalSession::without_raw_mode(&mut buffer);
            session.enter().unwrap();
        }
        assert_eq!(count(&buffer, ENTER), 1);
        assert_eq!(count(&buffer, LEAVE), 1);
    }
}
