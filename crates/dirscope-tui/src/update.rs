//! Browser reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus, Outcome};

/// Columns moved per horizontal scroll step in the details pane.
const HORIZONTAL_STEP: isize = 4;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Frame { width, height } => {
            app.layout(Rect::new(0, 0, width, height));
            vec![]
        }
        UiEvent::Terminal(Event::Resize(width, height)) => {
            app.layout(Rect::new(0, 0, width, height));
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c')) {
        tracing::debug!("browse cancelled with ctrl+c");
        app.outcome = Some(Outcome::Cancelled);
        return vec![];
    }

    if app.listing.filter_active {
        return handle_filter_key(app, key);
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            vec![]
        }
        KeyCode::Char('q') => {
            app.outcome = Some(Outcome::Chosen(app.current_dir().to_path_buf()));
            vec![]
        }
        KeyCode::Esc => {
            if app.listing.filter.is_empty() {
                app.outcome = Some(Outcome::Cancelled);
                vec![]
            } else {
                app.listing.clear_filter();
                app.selection_changed()
            }
        }
        KeyCode::Char('w') => {
            app.details.cycle_wrap();
            vec![]
        }
        KeyCode::Char('.') => {
            app.show_hidden = !app.show_hidden;
            vec![app.reload_effect()]
        }
        KeyCode::Char('/') => {
            app.set_focus(Focus::Listing);
            app.listing.filter_active = true;
            vec![]
        }
        _ => match app.focus {
            Focus::Listing => handle_listing_key(app, key),
            Focus::Details => handle_details_key(app, key),
        },
    }
}

fn handle_filter_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.listing.clear_filter(),
        KeyCode::Enter | KeyCode::Tab => app.listing.filter_active = false,
        KeyCode::Backspace => app.listing.pop_filter_char(),
        KeyCode::Up => app.listing.move_selection(-1),
        KeyCode::Down => app.listing.move_selection(1),
        KeyCode::Char('u') if ctrl => {
            while !app.listing.filter.is_empty() {
                app.listing.pop_filter_char();
            }
        }
        KeyCode::Char(c) if !ctrl => app.listing.push_filter_char(c),
        _ => return vec![],
    }
    app.selection_changed()
}

fn handle_listing_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.listing.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.listing.move_selection(1),
        KeyCode::PageUp => app.listing.page_up(),
        KeyCode::PageDown => app.listing.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.listing.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.listing.select_last(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => return descend(app),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => return ascend(app),
        _ => return vec![],
    }
    app.selection_changed()
}

fn handle_details_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Backspace {
        return ascend(app);
    }
    let details = &mut app.details;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => details.scroll_vertical(-1),
        KeyCode::Down | KeyCode::Char('j') => details.scroll_vertical(1),
        KeyCode::PageUp => details.page_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => details.page_down(),
        KeyCode::Home | KeyCode::Char('g') => details.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => details.scroll_to_bottom(),
        KeyCode::Left | KeyCode::Char('h') => details.scroll_horizontal(-HORIZONTAL_STEP),
        KeyCode::Right | KeyCode::Char('l') => details.scroll_horizontal(HORIZONTAL_STEP),
        _ => {}
    }
    vec![]
}

fn descend(app: &AppState) -> Vec<UiEffect> {
    match app.listing.selected_entry() {
        Some(entry) => vec![UiEffect::ReadDir {
            dir: entry.path.clone(),
            select: None,
        }],
        None => vec![],
    }
}

fn ascend(app: &AppState) -> Vec<UiEffect> {
    let current = app.current_dir();
    match current.parent() {
        Some(parent) => vec![UiEffect::ReadDir {
            dir: parent.to_path_buf(),
            select: current
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        }],
        None => vec![],
    }
}
