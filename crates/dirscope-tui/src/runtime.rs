//! Browser runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All filesystem I/O happens here. The reducer stays pure and produces
//! effects; `execute_effect` performs them and feeds results back into state.

use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use dirscope_core::details::EntryDetails;
use dirscope_core::scan;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Outcome};
use crate::terminal::{self, TerminalSession};
use crate::{render, update};

/// How long to wait for input before redrawing anyway.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen browser runtime, drawing on stderr.
pub struct BrowserRuntime {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    session: TerminalSession<Stderr>,
    pub state: AppState,
}

impl BrowserRuntime {
    /// Enters the alternate screen and prepares the first frame.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState) -> Result<Self> {
        terminal::install_panic_hook();

        let mut session = TerminalSession::new(io::stderr());
        session.enter()?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))
            .context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            session,
            state,
        })
    }

    /// Runs until the user chooses a directory or cancels.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(mut self) -> Result<Outcome> {
        let startup = self.state.startup_effects();
        execute_effects(&mut self.state, startup);

        let result = self.event_loop();
        self.session.leave()?;
        result?;

        Ok(self.state.outcome.take().unwrap_or(Outcome::Cancelled))
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit() {
            // Layout first so the frame paints what the stats describe.
            let size = self.terminal.size()?;
            update::update(
                &mut self.state,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );
            self.terminal
                .draw(|frame| render::render(&self.state, frame))?;

            if event::poll(IDLE_POLL_DURATION)? {
                let event = event::read().context("Failed to read terminal event")?;
                let effects = update::update(&mut self.state, UiEvent::Terminal(event));
                execute_effects(&mut self.state, effects);
            }
        }
        Ok(())
    }
}

/// Executes effects until none are left, including follow-ups they produce.
pub fn execute_effects(app: &mut AppState, effects: Vec<UiEffect>) {
    let mut pending = effects;
    while !pending.is_empty() {
        let mut next = Vec::new();
        for effect in pending {
            next.extend(execute_effect(app, effect));
        }
        pending = next;
    }
}

/// Performs one effect and returns any follow-up effects.
///
/// Failures never abort the browser: they land in the status line.
pub fn execute_effect(app: &mut AppState, effect: UiEffect) -> Vec<UiEffect> {
    match effect {
        UiEffect::ReadDir { dir, select } => {
            match scan::read_subdirectories(&dir, app.show_hidden) {
                Ok(entries) => {
                    tracing::debug!(dir = %dir.display(), count = entries.len(), "listed directory");
                    app.apply_listing(dir, entries, select.as_deref())
                }
                Err(err) => {
                    tracing::warn!("{err:#}");
                    app.status = Some(format!("{err:#}"));
                    vec![]
                }
            }
        }
        UiEffect::LoadDetails { path } => {
            let text = match EntryDetails::load(&path) {
                Ok(details) => details.to_text(),
                Err(err) => {
                    tracing::warn!("{err:#}");
                    format!("{err:#}")
                }
            };
            app.apply_details(&path, &text);
            vec![]
        }
    }
}
