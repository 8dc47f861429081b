//! Modal overlay
//!
//! Clears its area so the content underneath does not bleed through, then
//! draws a titled frame. Callers render the modal body into the returned
//! inner area.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

/// Modal appearance
#[derive(Debug, Clone)]
pub struct ModalStyle {
    /// Background color inside the modal (None = terminal default)
    pub bg_color: Option<Color>,
    pub border_color: Color,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            bg_color: None,
            border_color: Color::Cyan,
        }
    }
}

/// Draw an empty modal with `title` over `area` and return its inner area
///
/// Call this AFTER rendering the background.
pub fn render_modal(frame: &mut Frame, area: Rect, title: &str, style: &ModalStyle) -> Rect {
    frame.render_widget(Clear, area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(style.border_color))
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    if let Some(bg) = style.bg_color {
        block = block.style(Style::default().bg(bg));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `width` x `height` rectangle centered in `area`, with a 1-cell margin
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
