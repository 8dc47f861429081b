//! Single-line text input

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use empholite_dispatch_core::{Component, EventKind};

use crate::edit::Cursor;

/// Props for TextInput component
pub struct TextInputProps<'a, A> {
    /// Current value
    pub value: &'a str,
    /// Border title
    pub label: &'a str,
    /// Shown in grey when the value is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Render every character as `*`
    pub masked: bool,
    /// Called with the new value on every edit
    pub on_change: fn(String) -> A,
    /// Called with the current value on Enter
    pub on_submit: fn(String) -> A,
}

/// A bordered single-line input
///
/// The value lives in application state and arrives through props; the
/// input only keeps its cursor.
#[derive(Default)]
pub struct TextInput {
    cursor: Cursor,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }

        let value = props.value;
        self.cursor.clamp(value);

        let edit = if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => {
                    self.cursor.home();
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor.end(value);
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor.home();
                    (!value.is_empty()).then(String::new)
                }
                _ => None,
            }
        } else {
            match key.code {
                KeyCode::Enter => return Some((props.on_submit)(value.to_string())),
                KeyCode::Char(c) => self.cursor.insert(value, &c.to_string()),
                KeyCode::Backspace => self.cursor.backspace(value),
                KeyCode::Delete => self.cursor.delete(value),
                KeyCode::Left => {
                    self.cursor.left(value);
                    None
                }
                KeyCode::Right => {
                    self.cursor.right(value);
                    None
                }
                KeyCode::Home => {
                    self.cursor.home();
                    None
                }
                KeyCode::End => {
                    self.cursor.end(value);
                    None
                }
                _ => None,
            }
        };

        edit.map(props.on_change)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.cursor.clamp(props.value);

        let (text, style) = if props.value.is_empty() {
            (
                props.placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else if props.masked {
            ("*".repeat(props.value.chars().count()), Style::default())
        } else {
            (props.value.to_string(), Style::default())
        };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(props.label);

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let column = self.cursor.column(props.value) as u16;
            let cursor_x = area.x + 1 + column;
            if cursor_x < area.right() - 1 {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}
