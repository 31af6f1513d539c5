//! Proportional scrollbar shared by every scrollable widget.
//!
//! A host widget implements [`ScrollableSurface`] and hands two callbacks to
//! [`render_scrollbar`]: one for the full content extent and one for the
//! current scroll offset. The renderer overlays a vertical bar on the right
//! column and a horizontal bar on the bottom row of the widget's outer area
//! (its border, when it has one) and hands back the inner rectangle untouched,
//! so drawing a scrollbar never changes the host's layout.
//!
//! All proportional math is exact integer arithmetic with round-half-up:
//! `round(n / d) = (2n + d) / 2d`, carried out in `u128` so any `usize`
//! extent works. Results are identical on every platform.
//!
//! Without a border on either axis both tracks would end on the bottom-right
//! cell; the horizontal track then stops one cell short and the corner belongs
//! to the vertical bar.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Capability a widget exposes so the scrollbar can be drawn around it.
pub trait ScrollableSurface {
    /// Content rectangle, borders and padding already excluded.
    fn inner_rect(&self) -> Rect;

    /// Whether the widget currently holds input focus.
    fn has_focus(&self) -> bool;
}

/// Logical size of everything that could be scrolled into view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentExtent {
    pub width: usize,
    pub height: usize,
}

impl ContentExtent {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Top-left scroll position, in the units of [`ContentExtent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub vertical: usize,
    pub horizontal: usize,
}

impl ScrollOffset {
    pub fn new(vertical: usize, horizontal: usize) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// Scrollbar layout along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisGeometry {
    /// 1 when the outer area has a border (or padding) on this axis.
    pub border_width: u16,
    /// Drawable cells between the border cells.
    pub track_length: usize,
    pub thumb_size: usize,
    pub thumb_offset: usize,
}

/// Scrollbar layout for one frame. `None` means nothing is drawn on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollbarGeometry {
    pub vertical: Option<AxisGeometry>,
    pub horizontal: Option<AxisGeometry>,
}

impl ScrollbarGeometry {
    pub fn compute(outer: Rect, inner: Rect, extent: ContentExtent, offset: ScrollOffset) -> Self {
        let vertical = axis_geometry(outer.height, inner.height, extent.height, offset.vertical);
        let mut horizontal =
            axis_geometry(outer.width, inner.width, extent.width, offset.horizontal);

        if let (Some(v), Some(h)) = (vertical, horizontal)
            && v.border_width == 0
            && h.border_width == 0
        {
            horizontal = axis_geometry(
                outer.width - 1,
                inner.width,
                extent.width,
                offset.horizontal,
            );
        }

        Self {
            vertical,
            horizontal,
        }
    }
}

/// Computes the scrollbar layout along one axis.
///
/// Returns `None` when the content fits in the viewport (nothing to scroll)
/// or when there is no room for a track.
///
/// A scrolled view always shows a moved thumb: an offset that would round to
/// cell 0 is bumped to cell 1, and a thumb filling the whole track gives up one
/// cell so it can move. A one-cell track cannot show movement at all.
pub fn axis_geometry(
    outer_len: u16,
    inner_len: u16,
    content_len: usize,
    offset: usize,
) -> Option<AxisGeometry> {
    let border_width = u16::from(outer_len.saturating_sub(inner_len) >= 2);
    let track_length = usize::from(outer_len.saturating_sub(2 * border_width));
    let viewport_len = usize::from(inner_len);

    if track_length == 0 || content_len <= viewport_len {
        return None;
    }

    let max_scroll = content_len - viewport_len;
    let offset = offset.min(max_scroll);

    let mut thumb_size = scale(viewport_len, track_length, content_len).clamp(1, track_length);
    if offset > 0 && thumb_size == track_length && track_length > 1 {
        thumb_size -= 1;
    }

    let max_thumb_offset = track_length - thumb_size;
    let mut thumb_offset = scale(max_thumb_offset, offset, max_scroll);
    if thumb_offset == 0 && offset > 0 {
        thumb_offset = max_thumb_offset.min(1);
    }

    Some(AxisGeometry {
        border_width,
        track_length,
        thumb_size,
        thumb_offset,
    })
}

/// `round(a * b / den)` with round-half-up. `den` must be non-zero.
///
/// `a` is a cell count, so the product cannot overflow `u128`. Callers keep one
/// factor at most `den`, so the result fits in `usize`.
fn scale(a: usize, b: usize, den: usize) -> usize {
    let scaled = round_div(a as u128 * b as u128, den as u128);
    usize::try_from(scaled).unwrap_or(usize::MAX)
}

/// Round-half-up division of non-negative integers. `den` must be non-zero.
fn round_div(num: u128, den: u128) -> u128 {
    (2 * num + den) / (2 * den)
}

/// Glyphs and styles used to paint a scrollbar.
#[derive(Debug, Clone)]
pub struct ScrollbarStyle {
    pub vertical_track_symbol: &'static str,
    pub horizontal_track_symbol: &'static str,
    pub thumb_symbol: &'static str,
    pub track: Style,
    pub thumb_focused: Style,
    pub thumb_unfocused: Style,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            vertical_track_symbol: "│",
            horizontal_track_symbol: "─",
            thumb_symbol: "█",
            track: Style::default().fg(Color::DarkGray),
            thumb_focused: Style::default().fg(Color::Cyan),
            thumb_unfocused: Style::default().fg(Color::Gray),
        }
    }
}

/// Draws scrollbars for `surface` with the default style.
///
/// See [`render_scrollbar_styled`].
pub fn render_scrollbar<S, E, O>(
    surface: &S,
    content_extent: E,
    scroll_offset: O,
    outer: Rect,
    buf: &mut Buffer,
) -> Rect
where
    S: ScrollableSurface + ?Sized,
    E: FnOnce() -> ContentExtent,
    O: FnOnce() -> ScrollOffset,
{
    render_scrollbar_styled(
        surface,
        content_extent,
        scroll_offset,
        outer,
        buf,
        &ScrollbarStyle::default(),
    )
}

/// Draws scrollbars for `surface` inside `outer` and returns the surface's
/// inner rectangle unchanged.
///
/// The vertical bar occupies the right-most column of `outer`, the horizontal
/// bar its bottom row. Cells outside `buf` are ignored.
pub fn render_scrollbar_styled<S, E, O>(
    surface: &S,
    content_extent: E,
    scroll_offset: O,
    outer: Rect,
    buf: &mut Buffer,
    style: &ScrollbarStyle,
) -> Rect
where
    S: ScrollableSurface + ?Sized,
    E: FnOnce() -> ContentExtent,
    O: FnOnce() -> ScrollOffset,
{
    let inner = surface.inner_rect();
    if outer.is_empty() {
        return inner;
    }

    let geometry = ScrollbarGeometry::compute(outer, inner, content_extent(), scroll_offset());
    let thumb_style = if surface.has_focus() {
        style.thumb_focused
    } else {
        style.thumb_unfocused
    };

    if let Some(axis) = geometry.vertical {
        let x = outer.x + outer.width - 1;
        let y0 = outer.y + axis.border_width;
        paint_track(buf, axis, style.vertical_track_symbol, style, thumb_style, |i| {
            (x, y0 + i)
        });
    }

    if let Some(axis) = geometry.horizontal {
        let y = outer.y + outer.height - 1;
        let x0 = outer.x + axis.border_width;
        paint_track(buf, axis, style.horizontal_track_symbol, style, thumb_style, |i| {
            (x0 + i, y)
        });
    }

    inner
}

fn paint_track(
    buf: &mut Buffer,
    axis: AxisGeometry,
    track_symbol: &str,
    style: &ScrollbarStyle,
    thumb_style: Style,
    position: impl Fn(u16) -> (u16, u16),
) {
    let thumb = axis.thumb_offset..axis.thumb_offset + axis.thumb_size;
    for i in 0..axis.track_length {
        let (symbol, cell_style) = if thumb.contains(&i) {
            (style.thumb_symbol, thumb_style)
        } else {
            (track_symbol, style.track)
        };
        // Track length is bounded by a u16 rect dimension.
        if let Some(cell) = buf.cell_mut(position(i as u16)) {
            cell.set_symbol(symbol).set_style(cell_style);
        }
    }
}
