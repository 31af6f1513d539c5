//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent filesystem I/O only; the reducer never touches the disk.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// List the subdirectories of `dir` and make it the current directory.
    ///
    /// `select` names the entry to highlight afterwards (the child we just
    /// left when going up).
    ReadDir {
        dir: PathBuf,
        select: Option<String>,
    },

    /// Load metadata for the details pane.
    LoadDetails { path: PathBuf },
}
