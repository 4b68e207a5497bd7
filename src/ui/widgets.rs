//! Dialog helpers shared by the draw functions.
//!
//! [dialog_area] positions a dialog inside the frame and [draw_dialog] paints it with a
//! cleared background. The individual dialogs live in [draw].

pub mod draw;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

/// Dialog size presets. `Custom` is columns by rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSize {
    Small,
    Medium,
    Large,
    Custom(u16, u16),
}

impl DialogSize {
    fn dimensions(self, area: Rect) -> (u16, u16) {
        match self {
            DialogSize::Small => (area.width / 3, area.height / 4),
            DialogSize::Medium => (area.width / 2, area.height / 2),
            DialogSize::Large => (area.width * 3 / 4, area.height * 3 / 4),
            DialogSize::Custom(w, h) => (w, h),
        }
    }
}

pub struct DialogStyle<'a> {
    pub border_style: Style,
    pub style: Style,
    pub title: Option<Span<'a>>,
}

/// Centered rectangle of `size`, clipped to `area`.
pub fn dialog_area(area: Rect, size: DialogSize) -> Rect {
    let (w, h) = size.dimensions(area);
    let width = w.clamp(1, area.width.max(1)).min(area.width);
    let height = h.clamp(1, area.height.max(1)).min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Clears `rect` and draws a bordered dialog holding `content`.
pub fn draw_dialog<'a, T>(
    frame: &mut Frame,
    rect: Rect,
    style: &DialogStyle,
    content: T,
    alignment: Alignment,
) where
    T: Into<Text<'a>>,
{
    frame.render_widget(Clear, rect);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border_style)
        .style(style.style);
    if let Some(title) = &style.title {
        block = block.title(title.clone());
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(style.style)
        .alignment(alignment);
    frame.render_widget(paragraph, rect);
}
