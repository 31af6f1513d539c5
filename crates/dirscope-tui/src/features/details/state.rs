//! Details pane state: text, wrap policy, line statistics and scroll.

use ratatui::layout::Rect;

use crate::common::{
    ContentExtent, LineStats, ScrollOffset, ScrollableSurface, WrapPolicy, compute_line_stats,
    sanitize_for_display,
};

/// Scrollable text view showing metadata of the selected entry.
///
/// `stats` is recomputed synchronously by every setter that changes the text,
/// the wrap policy or the viewport width, so it always describes what the
/// next frame paints.
#[derive(Debug, Default)]
pub struct DetailsState {
    text: String,
    wrap: WrapPolicy,
    stats: LineStats,
    vertical: usize,
    horizontal: usize,
    inner: Rect,
    focused: bool,
}

impl DetailsState {
    pub fn new(wrap: WrapPolicy) -> Self {
        Self {
            wrap,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn wrap(&self) -> WrapPolicy {
        self.wrap
    }

    pub fn stats(&self) -> LineStats {
        self.stats
    }

    /// Replaces the text and scrolls back to the top.
    pub fn set_text(&mut self, text: &str) {
        self.text = sanitize_for_display(text).into_owned();
        self.vertical = 0;
        self.horizontal = 0;
        self.relayout();
    }

    pub fn set_wrap(&mut self, wrap: WrapPolicy) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.horizontal = 0;
            self.relayout();
        }
    }

    pub fn cycle_wrap(&mut self) {
        self.set_wrap(self.wrap.next());
    }

    /// Records the content rectangle computed by the layout pass.
    pub fn set_inner(&mut self, inner: Rect) {
        let width_changed = inner.width != self.inner.width;
        self.inner = inner;
        if width_changed {
            self.relayout();
        } else {
            self.clamp_scroll();
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn scroll_vertical(&mut self, delta: isize) {
        self.vertical = self
            .vertical
            .saturating_add_signed(delta)
            .min(self.max_vertical());
    }

    pub fn scroll_horizontal(&mut self, delta: isize) {
        self.horizontal = self
            .horizontal
            .saturating_add_signed(delta)
            .min(self.max_horizontal());
    }

    pub fn page_down(&mut self) {
        self.scroll_vertical(self.page_size() as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll_vertical(-(self.page_size() as isize));
    }

    pub fn scroll_to_top(&mut self) {
        self.vertical = 0;
        self.horizontal = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.vertical = self.max_vertical();
    }

    pub fn content_extent(&self) -> ContentExtent {
        ContentExtent::new(self.stats.longest_line_length, self.stats.line_count)
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.vertical, self.horizontal)
    }

    fn max_vertical(&self) -> usize {
        self.stats
            .line_count
            .saturating_sub(usize::from(self.inner.height))
    }

    fn max_horizontal(&self) -> usize {
        self.stats
            .longest_line_length
            .saturating_sub(usize::from(self.inner.width))
    }

    fn page_size(&self) -> usize {
        usize::from(self.inner.height.saturating_sub(1)).max(1)
    }

    fn relayout(&mut self) {
        self.stats = compute_line_stats(&self.text, usize::from(self.inner.width), self.wrap);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.vertical = self.vertical.min(self.max_vertical());
        self.horizontal = self.horizontal.min(self.max_horizontal());
    }
}

impl ScrollableSurface for DetailsState {
    fn inner_rect(&self) -> Rect {
        self.inner
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(text: &str, wrap: WrapPolicy, width: u16, height: u16) -> DetailsState {
        let mut state = DetailsState::new(wrap);
        state.set_inner(Rect::new(0, 0, width, height));
        state.set_text(text);
        state
    }

    #[test]
    fn test_empty_details_is_one_line() {
        let state = DetailsState::new(WrapPolicy::Word);
        assert_eq!(state.stats(), LineStats::EMPTY);
        assert_eq!(state.content_extent(), ContentExtent::new(0, 1));
    }

    #[test]
    fn test_stats_follow_text_and_width() {
        let mut state = details("aaaa\naaaa\naaaa\naaaa", WrapPolicy::Character, 2, 3);
        assert_eq!(state.content_extent(), ContentExtent::new(2, 8));

        state.set_inner(Rect::new(0, 0, 4, 3));
        assert_eq!(state.content_extent(), ContentExtent::new(4, 4));

        state.set_wrap(WrapPolicy::None);
        state.set_text("short\nsomewhat longer line");
        assert_eq!(state.content_extent(), ContentExtent::new(20, 2));
    }

    #[test]
    fn test_vertical_scroll_is_clamped() {
        let mut state = details("1\n2\n3\n4\n5\n6", WrapPolicy::None, 10, 4);
        state.scroll_vertical(10);
        assert_eq!(state.scroll_offset(), ScrollOffset::new(2, 0));
        state.scroll_vertical(-1);
        assert_eq!(state.scroll_offset().vertical, 1);
        state.page_up();
        assert_eq!(state.scroll_offset().vertical, 0);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset().vertical, 2);
    }

    #[test]
    fn test_horizontal_scroll_only_when_lines_overflow() {
        let mut state = details("0123456789abcdef", WrapPolicy::None, 10, 4);
        state.scroll_horizontal(100);
        assert_eq!(state.scroll_offset().horizontal, 6);

        state.set_wrap(WrapPolicy::Character);
        assert_eq!(state.scroll_offset().horizontal, 0);
        state.scroll_horizontal(3);
        assert_eq!(state.scroll_offset().horizontal, 0);
    }

    #[test]
    fn test_resize_reclamps_scroll() {
        let mut state = details("1\n2\n3\n4\n5\n6", WrapPolicy::Word, 10, 2);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset().vertical, 4);

        state.set_inner(Rect::new(0, 0, 10, 5));
        assert_eq!(state.scroll_offset().vertical, 1);
    }

    #[test]
    fn test_set_text_resets_scroll_and_sanitizes() {
        let mut state = details("1\n2\n3\n4\n5\n6", WrapPolicy::None, 10, 2);
        state.scroll_vertical(3);
        state.set_text("a\tb");
        assert_eq!(state.scroll_offset(), ScrollOffset::default());
        assert_eq!(state.text(), "a    b");
        assert_eq!(state.stats().longest_line_length, 6);
    }

    #[test]
    fn test_cycle_wrap() {
        let mut state = details("x", WrapPolicy::None, 10, 2);
        state.cycle_wrap();
        assert_eq!(state.wrap(), WrapPolicy::Character);
        state.cycle_wrap();
        assert_eq!(state.wrap(), WrapPolicy::Word);
    }
}
