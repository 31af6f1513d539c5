//! Text utilities for TUI rendering.
//!
//! Shared text processing functions used across rendering paths.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` terminal columns.
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Sanitizes text for display by removing escape bytes and expanding tabs.
///
/// Directory names and link targets are arbitrary bytes; an embedded `\x1b`
/// would otherwise be interpreted by the terminal. Tabs are expanded to four
/// spaces because the layout engine counts every char as one column.
///
/// Returns a borrowed `Cow` when nothing needed to change.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains('\x1b') || s.contains('\t') {
        Cow::Owned(s.replace('\x1b', "").replace('\t', "    "))
    } else {
        Cow::Borrowed(s)
    }
}

/// Returns the chars of `row` in the column window `[offset, offset + width)`.
pub fn slice_columns(row: &str, offset: usize, width: usize) -> &str {
    let mut indices = row.char_indices().map(|(idx, _)| idx).skip(offset);
    let Some(start) = indices.next() else {
        return "";
    };
    let end = if width == 0 {
        start
    } else {
        indices.nth(width - 1).unwrap_or(row.len())
    };
    &row[start..end]
}
