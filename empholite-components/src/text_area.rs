//! Multi-line text editor

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use empholite_dispatch_core::{Component, EventKind};

use crate::edit::Cursor;

const INDENT: &str = "  ";

/// Props for TextArea component
pub struct TextAreaProps<'a, A> {
    pub value: &'a str,
    /// Border title
    pub label: &'a str,
    pub is_focused: bool,
    /// Error shown under the text, in red
    pub error: Option<&'a str>,
    /// Called with the new value on every edit
    pub on_change: fn(String) -> A,
}

/// A bordered multi-line editor
///
/// Enter inserts a newline and Tab inserts two spaces. Submission is left
/// to the owner (a dialog usually binds it to a chord such as Ctrl+S).
#[derive(Default)]
pub struct TextArea {
    cursor: Cursor,
    scroll: u16,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset cursor and scroll, e.g. when the dialog reopens
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn keep_cursor_visible(&mut self, value: &str, height: u16) {
        let line = self.cursor.line(value) as u16;
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }
}

impl<A> Component<A> for TextArea {
    type Props<'a> = TextAreaProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        let value = props.value;
        self.cursor.clamp(value);

        let edit = match key.code {
            KeyCode::Char(c) => self.cursor.insert(value, &c.to_string()),
            KeyCode::Enter => self.cursor.insert(value, "\n"),
            KeyCode::Tab => self.cursor.insert(value, INDENT),
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
            KeyCode::Up => {
                self.cursor.vertical(value, -1);
                None
            }
            KeyCode::Down => {
                self.cursor.vertical(value, 1);
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
        };

        edit.map(props.on_change)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.cursor.clamp(props.value);

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(props.label);
        if let Some(error) = props.error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {error} "),
                Style::default().fg(Color::Red),
            )));
        }

        let inner_height = area.height.saturating_sub(2);
        self.keep_cursor_visible(props.value, inner_height);

        let lines: Vec<Line> = props.value.split('\n').map(Line::raw).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);

        if props.is_focused && area.width > 2 && inner_height > 0 {
            let x = area.x + 1 + self.cursor.column(props.value) as u16;
            let y = area.y + 1 + self.cursor.line(props.value) as u16 - self.scroll;
            if x < area.right() - 1 {
                frame.set_cursor_position((x, y));
            }
        }
    }
}
