//! Pure view/render functions for the browser.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never mutate
//! state. Layout side effects (inner rects, line statistics) already happened
//! in the reducer on `UiEvent::Frame`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::details::render_details;
use crate::listing::render_listing;
use crate::state::{AppState, Focus, ViewLayout};

/// Renders the entire browser to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = ViewLayout::compute(frame.area(), app.list_width_percent);

    render_listing(&app.listing, frame, layout.listing);
    render_details(&app.details, frame, layout.details);
    render_status_line(app, frame, layout.status);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::DarkGray);

    let spans: Vec<Span> = if let Some(status) = &app.status {
        vec![Span::styled(
            truncate_with_ellipsis(status, usize::from(area.width)),
            Style::default().fg(Color::Red),
        )]
    } else if app.listing.filter_active {
        vec![
            Span::styled("Enter", key),
            Span::raw(" keep filter  "),
            Span::styled("Esc", key),
            Span::raw(" clear"),
        ]
    } else {
        let mut spans = vec![
            Span::styled("Enter", key),
            Span::raw(" open  "),
            Span::styled("Bksp", key),
            Span::raw(" up  "),
            Span::styled("/", key),
            Span::raw(" filter  "),
            Span::styled("Tab", key),
            Span::raw(match app.focus {
                Focus::Listing => " details  ",
                Focus::Details => " list  ",
            }),
            Span::styled("w", key),
            Span::raw(" wrap  "),
            Span::styled("q", key),
            Span::raw(" choose  "),
            Span::styled("Esc", key),
            Span::raw(" cancel"),
        ];
        if app.show_hidden {
            spans.push(Span::styled("  [hidden]", Style::default().fg(Color::Yellow)));
        }
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let count = format!("{}/{}", app.listing.len(), app.listing.total_len());
    let count_width = u16::try_from(count.len()).unwrap_or(u16::MAX);
    if area.width > count_width.saturating_add(1) {
        let count_area = Rect::new(
            area.x + area.width - count_width,
            area.y,
            count_width,
            area.height,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(count, Style::default().fg(Color::DarkGray))),
            count_area,
        );
    }
}
