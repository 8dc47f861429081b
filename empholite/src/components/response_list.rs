//! The mocked responses returned by the list endpoint

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;

use super::Component;
use crate::action::Action;

pub const EMPTY_TEXT: &str = "No responses yet.";

pub struct ResponseList;

pub struct ResponseListProps<'a> {
    /// The `items` of the last list payload, if any
    pub items: Option<&'a Value>,
    pub loading: bool,
}

/// One line per item; objects show `method path` when they have them
fn item_line(item: &Value) -> String {
    let field = |name: &str| item.get(name).and_then(Value::as_str);
    match (field("method"), field("path")) {
        (Some(method), Some(path)) => format!("{method} {path}"),
        (None, Some(path)) => path.to_string(),
        _ => item.to_string(),
    }
}

impl Component<Action> for ResponseList {
    type Props<'a> = ResponseListProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Responses ");

        let lines: Vec<Line> = match props.items.and_then(Value::as_array) {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| Line::raw(format!(" {}", item_line(item))))
                .collect(),
            _ if props.loading => vec![Line::styled(
                " Loading…",
                Style::default().fg(Color::Yellow),
            )],
            _ => vec![Line::styled(
                format!(" {EMPTY_TEXT}"),
                Style::default().fg(Color::DarkGray),
            )],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
