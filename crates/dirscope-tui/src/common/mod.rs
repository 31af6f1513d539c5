//! Shared building blocks used by the browser widgets.

pub mod layout;
pub mod scrollbar;
pub mod text;

pub use layout::{LineStats, WrapPolicy, compute_line_stats, wrap_rows};
pub use scrollbar::{
    ContentExtent, ScrollOffset, ScrollableSurface, ScrollbarStyle, render_scrollbar,
};
pub use text::{sanitize_for_display, slice_columns, truncate_with_ellipsis};
