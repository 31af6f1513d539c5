//! Scrollable text pane with per-entry metadata.

mod render;
mod state;

pub use render::render_details;
pub use state::DetailsState;
