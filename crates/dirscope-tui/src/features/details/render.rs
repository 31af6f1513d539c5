//! Details pane view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::DetailsState;
use crate::common::{ScrollableSurface, render_scrollbar, slice_columns, wrap_rows};

pub fn render_details(state: &DetailsState, frame: &mut Frame, area: Rect) {
    let border_color = if state.has_focus() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Details ")
        .title_bottom(Line::from(format!(" wrap: {} ", state.wrap())).right_aligned());
    frame.render_widget(block, area);

    let inner = state.inner_rect();
    let offset = state.scroll_offset();
    let width = usize::from(inner.width);

    // Rows come from the same layout pass that produced the stats.
    let lines: Vec<Line<'_>> = wrap_rows(state.text(), width, state.wrap())
        .iter()
        .skip(offset.vertical)
        .take(usize::from(inner.height))
        .map(|row| Line::from(slice_columns(row, offset.horizontal, width).to_string()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    render_scrollbar(
        state,
        || state.content_extent(),
        || state.scroll_offset(),
        area,
        frame.buffer_mut(),
    );
}
