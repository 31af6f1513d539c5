//! Directory list state: entries, fuzzy filter, selection and scroll.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use dirscope_core::scan::DirEntry;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use ratatui::layout::Rect;

use crate::common::{ContentExtent, ScrollOffset, ScrollableSurface};

/// State of the subdirectory list.
#[derive(Debug, Default)]
pub struct ListingState {
    /// Directory whose children are listed.
    pub dir: PathBuf,
    entries: Vec<DirEntry>,
    /// Indices into `entries`, in display order.
    filtered: Vec<usize>,
    /// Current filter text.
    pub filter: String,
    /// True while keystrokes go to the filter.
    pub filter_active: bool,
    /// Index into the filtered list.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
    inner: Rect,
    focused: bool,
}

impl ListingState {
    pub fn new(dir: PathBuf, entries: Vec<DirEntry>) -> Self {
        let mut state = Self {
            focused: true,
            ..Self::default()
        };
        state.set_entries(dir, entries, None);
        state
    }

    /// Replaces the listing, clearing the filter.
    ///
    /// When `select` names an entry it becomes the selection (used when
    /// going up so the directory we came from stays highlighted).
    pub fn set_entries(&mut self, dir: PathBuf, entries: Vec<DirEntry>, select: Option<&str>) {
        self.dir = dir;
        self.entries = entries;
        self.filter.clear();
        self.filter_active = false;
        self.refilter();
        self.selected = select
            .and_then(|name| {
                self.filtered
                    .iter()
                    .position(|&idx| self.entries[idx].name == name)
            })
            .unwrap_or(0);
        self.offset = 0;
        self.ensure_selected_visible();
    }

    /// Number of entries after filtering.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Total entries before filtering.
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.filtered
            .get(self.selected)
            .map(|&idx| &self.entries[idx])
    }

    /// Path of the selected entry, if any.
    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_entry().map(|entry| entry.path.as_path())
    }

    /// Entries currently in view, paired with their filtered index.
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &DirEntry)> {
        let height = usize::from(self.inner.height);
        self.filtered
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(height)
            .map(|(pos, &idx)| (pos, &self.entries[idx]))
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter_and_reset();
    }

    pub fn pop_filter_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter_and_reset();
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter_active = false;
        if !self.filter.is_empty() {
            self.filter.clear();
            self.refilter_and_reset();
        }
    }

    /// Moves the selection by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.ensure_selected_visible();
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.page_size() as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.page_size() as isize));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    /// Records the content rectangle computed by the layout pass.
    pub fn set_inner(&mut self, inner: Rect) {
        self.inner = inner;
        self.ensure_selected_visible();
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Names are truncated to the pane, never scrolled sideways, so the
    /// extent has no width.
    pub fn content_extent(&self) -> ContentExtent {
        ContentExtent::new(0, self.filtered.len())
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.offset, 0)
    }

    fn page_size(&self) -> usize {
        usize::from(self.inner.height).max(1)
    }

    fn ensure_selected_visible(&mut self) {
        let height = usize::from(self.inner.height);
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
        // Never leave blank rows at the bottom when the list could fill them.
        let max_offset = self.filtered.len().saturating_sub(height);
        self.offset = self.offset.min(max_offset);
    }

    fn refilter_and_reset(&mut self) {
        self.refilter();
        self.selected = 0;
        self.offset = 0;
    }

    fn refilter(&mut self) {
        if self.filter.is_empty() {
            self.filtered = (0..self.entries.len()).collect();
            return;
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(&self.filter, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();
        let mut scored: Vec<(u32, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let haystack = Utf32Str::new(&entry.name, &mut buf);
                pattern
                    .score(haystack, &mut matcher)
                    .map(|score| (score, idx))
            })
            .collect();

        // Best matches first; ties keep directory order.
        scored.sort_by_key(|&(score, idx)| (Reverse(score), idx));
        self.filtered = scored.into_iter().map(|(_, idx)| idx).collect();
    }
}

impl ScrollableSurface for ListingState {
    fn inner_rect(&self) -> Rect {
        self.inner
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}
