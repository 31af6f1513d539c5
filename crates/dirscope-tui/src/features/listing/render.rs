//! Directory list view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::ListingState;
use crate::common::{
    ScrollableSurface, render_scrollbar, sanitize_for_display, truncate_with_ellipsis,
};

/// Renders the list inside `area` (border included).
///
/// The state's inner rect must already match `area` shrunk by the border;
/// the layout pass in `AppState::layout` takes care of that.
pub fn render_listing(state: &ListingState, frame: &mut Frame, area: Rect) {
    let border_color = if state.has_focus() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let title = truncate_with_ellipsis(
        &sanitize_for_display(&state.dir.display().to_string()),
        usize::from(area.width.saturating_sub(4)),
    );
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "));

    if state.filter_active || !state.filter.is_empty() {
        let cursor = if state.filter_active { "█" } else { "" };
        block = block.title_bottom(Line::from(vec![
            Span::styled(" /", Style::default().fg(Color::Yellow)),
            Span::raw(sanitize_for_display(&state.filter).into_owned()),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" {}/{} ", state.len(), state.total_len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    frame.render_widget(block, area);

    let inner = state.inner_rect();

    if state.is_empty() {
        let message = if state.total_len() == 0 {
            "(no subdirectories)"
        } else {
            "(no matches)"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))),
            inner,
        );
    } else {
        let width = usize::from(inner.width);
        let lines: Vec<Line<'_>> = state
            .visible_entries()
            .map(|(pos, entry)| {
                let suffix = if entry.is_symlink { "@" } else { "/" };
                let name = format!("{}{suffix}", sanitize_for_display(&entry.name));
                let text = truncate_with_ellipsis(&name, width);
                let style = if pos == state.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(if state.has_focus() {
                            Color::Cyan
                        } else {
                            Color::Gray
                        })
                        .add_modifier(Modifier::BOLD)
                } else if entry.is_hidden() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(text, style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    render_scrollbar(
        state,
        || state.content_extent(),
        || state.scroll_offset(),
        area,
        frame.buffer_mut(),
    );
}
