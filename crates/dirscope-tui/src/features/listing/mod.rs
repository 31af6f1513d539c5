//! Subdirectory list navigator.

mod render;
mod state;

pub use render::render_listing;
pub use state::ListingState;
