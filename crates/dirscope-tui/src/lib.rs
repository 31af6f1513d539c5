//! Full-screen directory browser for dirscope.
//!
//! The two panes are scrollable viewports: the list of subdirectories and a
//! details view whose text is laid out under a configurable wrap policy.
//! Both paint their scrollbars on their own borders through
//! [`common::render_scrollbar`].

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::path::PathBuf;

use anyhow::Result;
pub use features::{details, listing};
pub use runtime::BrowserRuntime;
pub use state::{BrowserOptions, Outcome};

use crate::state::AppState;

/// Browses from `start_dir` until the user chooses a directory or cancels.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the start directory cannot
/// be listed, or the terminal fails.
pub fn run_browser(options: BrowserOptions, start_dir: PathBuf) -> Result<Outcome> {
    // The browser draws on stderr so stdout stays free for the result.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The browser requires a terminal on stderr.\n\
             Run dirscope from an interactive shell."
        );
    }

    let entries = dirscope_core::scan::read_subdirectories(&start_dir, options.show_hidden)?;
    tracing::info!(dir = %start_dir.display(), entries = entries.len(), "starting browser");

    let state = AppState::new(options, start_dir, entries);
    BrowserRuntime::new(state)?.run()
}
