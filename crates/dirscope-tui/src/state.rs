//! Application state composition.
//!
//! ```text
//! AppState
//! ├── listing: ListingState   (current directory, filter, selection)
//! ├── details: DetailsState   (metadata text of the selection)
//! ├── focus: Focus            (which pane receives keys)
//! ├── status: Option<String>  (last non-fatal error)
//! └── outcome: Option<Outcome> (set once the user accepts or cancels)
//! ```

use std::path::{Path, PathBuf};

use dirscope_core::Config;
use dirscope_core::scan::DirEntry;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::common::WrapPolicy;
use crate::details::DetailsState;
use crate::effects::UiEffect;
use crate::listing::ListingState;

/// Height of the status line below the panes.
pub const STATUS_HEIGHT: u16 = 1;

/// Options the browser starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserOptions {
    pub show_hidden: bool,
    pub wrap: WrapPolicy,
    pub list_width_percent: u16,
}

impl From<&Config> for BrowserOptions {
    fn from(config: &Config) -> Self {
        Self {
            show_hidden: config.show_hidden,
            wrap: config.wrap,
            list_width_percent: config.effective_list_width_percent(),
        }
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Listing,
    Details,
}

/// How the browser ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user accepted this directory.
    Chosen(PathBuf),
    /// The user backed out without choosing.
    Cancelled,
}

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub listing: Rect,
    pub details: Rect,
    pub status: Rect,
}

impl ViewLayout {
    pub fn compute(area: Rect, list_width_percent: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(list_width_percent),
                Constraint::Min(0),
            ])
            .split(rows[0]);
        Self {
            listing: panes[0],
            details: panes[1],
            status: rows[1],
        }
    }
}

/// Content rectangle of a bordered pane.
pub fn bordered_inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub struct AppState {
    pub listing: ListingState,
    pub details: DetailsState,
    pub focus: Focus,
    pub show_hidden: bool,
    pub list_width_percent: u16,
    pub status: Option<String>,
    pub outcome: Option<Outcome>,
    /// Path whose metadata the details pane currently shows.
    details_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(options: BrowserOptions, dir: PathBuf, entries: Vec<DirEntry>) -> Self {
        let mut state = Self {
            listing: ListingState::new(dir, entries),
            details: DetailsState::new(options.wrap),
            focus: Focus::Listing,
            show_hidden: options.show_hidden,
            list_width_percent: options.list_width_percent,
            status: None,
            outcome: None,
            details_path: None,
        };
        state.set_focus(Focus::Listing);
        state
    }

    /// Effects needed before the first frame (details for the initial selection).
    pub fn startup_effects(&mut self) -> Vec<UiEffect> {
        self.selection_changed()
    }

    pub fn should_quit(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn current_dir(&self) -> &Path {
        &self.listing.dir
    }

    /// Lays the panes out for `area` and pushes the inner rectangles into the
    /// widgets. Recomputes the details pane's line statistics if its width
    /// changed.
    pub fn layout(&mut self, area: Rect) -> ViewLayout {
        let layout = ViewLayout::compute(area, self.list_width_percent);
        self.listing.set_inner(bordered_inner(layout.listing));
        self.details.set_inner(bordered_inner(layout.details));
        layout
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.listing.set_focus(focus == Focus::Listing);
        self.details.set_focus(focus == Focus::Details);
    }

    pub fn toggle_focus(&mut self) {
        self.set_focus(match self.focus {
            Focus::Listing => Focus::Details,
            Focus::Details => Focus::Listing,
        });
    }

    /// Replaces the listing after a successful scan.
    pub fn apply_listing(
        &mut self,
        dir: PathBuf,
        entries: Vec<DirEntry>,
        select: Option<&str>,
    ) -> Vec<UiEffect> {
        self.status = None;
        self.listing.set_entries(dir, entries, select);
        self.selection_changed()
    }

    /// Shows loaded details text, unless the selection moved on meanwhile.
    pub fn apply_details(&mut self, path: &Path, text: &str) {
        if self.details_path.as_deref() == Some(path) {
            self.details.set_text(text);
        }
    }

    /// Re-targets the details pane at the current selection.
    ///
    /// Returns a load effect when the selected path differs from the one shown.
    pub fn selection_changed(&mut self) -> Vec<UiEffect> {
        let selected = self.listing.selected_path().map(Path::to_path_buf);
        if selected.is_some() && selected == self.details_path {
            return vec![];
        }
        self.details_path.clone_from(&selected);
        match selected {
            Some(path) => vec![UiEffect::LoadDetails { path }],
            None => {
                let message = if self.listing.total_len() == 0 {
                    "No subdirectories here."
                } else {
                    "No entry matches the filter."
                };
                self.details.set_text(message);
                vec![]
            }
        }
    }

    /// Effect that re-reads the current directory, keeping the selection.
    pub fn reload_effect(&self) -> UiEffect {
        UiEffect::ReadDir {
            dir: self.listing.dir.clone(),
            select: self.listing.selected_entry().map(|e| e.name.clone()),
        }
    }
}
