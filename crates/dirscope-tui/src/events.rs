//! Events consumed by the reducer.

use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Emitted before every draw with the current terminal size, so layout
    /// (and the details pane's line statistics) is fresh for the next paint.
    Frame { width: u16, height: u16 },
    /// Raw crossterm input.
    Terminal(Event),
}
