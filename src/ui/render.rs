//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into header, panes and status line.
//!
//! This module stays "pure rendering": it reads the app state and produces widgets,
//! without owning any tern core logic.

use crate::app::{AppState, Modal};
use crate::ui::{panes, widgets::draw};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};

/// Height of the info box row.
const HEADER_HEIGHT: u16 = 3;

/// Share of the body width given to the file list, in percent.
const LIST_PERCENT: u16 = 40;

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub list: Rect,
    pub preview: Rect,
    pub status: Rect,
}

/// Splits `area` into the header row, the two panes and the status line.
pub fn layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LIST_PERCENT),
            Constraint::Percentage(100 - LIST_PERCENT),
        ])
        .split(rows[1]);

    ScreenLayout {
        header: rows[0],
        list: body[0],
        preview: body[1],
        status: rows[2],
    }
}

/// Render function which renders the entire terminal UI for tern on each frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.theme().base_style()), area);

    let screen = layout(area);
    panes::draw_info_boxes(frame, app, screen.header);
    panes::draw_file_list(frame, app, screen.list);
    panes::draw_preview(frame, app, screen.preview);
    draw::draw_status_line(frame, app, screen.status);

    render_modals(frame, app);
}

/// Draws every open modal, bottom first.
fn render_modals(frame: &mut Frame, app: &AppState) {
    for modal in app.modals().iter() {
        match modal {
            Modal::Help => draw::draw_help_dialog(frame, app),
            Modal::Fuzzy(find) => draw::draw_find_dialog(frame, app, find),
            Modal::Settings(settings) => draw::draw_settings_dialog(frame, app, settings),
        }
    }
}
