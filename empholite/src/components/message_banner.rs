//! Dismissible message banner
//!
//! Renders nothing while the message is empty.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use empholite_dispatch::{EventKind, Keybindings};

use super::{chord_hint, key_hint, Component};
use crate::action::Action;
use crate::keys::Command;
use crate::state::{Message, MessageContext};

pub struct MessageBanner;

pub struct MessageBannerProps<'a> {
    pub message: &'a Message,
    pub keys: &'a Keybindings<Command>,
    /// A text input has focus, so hint the chord rather than the plain key
    pub text_entry: bool,
}

impl MessageBanner {
    /// Rows needed for `message`; zero when there is nothing to show
    pub fn height(message: &Message) -> u16 {
        match (message.is_empty(), &message.detail) {
            (true, _) => 0,
            (false, Some(_)) => 4,
            (false, None) => 3,
        }
    }
}

pub(crate) fn context_style(context: Option<MessageContext>) -> (Color, &'static str) {
    match context {
        Some(MessageContext::Success) => (Color::Green, "success"),
        Some(MessageContext::Warning) => (Color::Yellow, "warning"),
        Some(MessageContext::Danger) => (Color::Red, "danger"),
        Some(MessageContext::Info) | None => (Color::Cyan, "info"),
    }
}

impl Component<Action> for MessageBanner {
    type Props<'a> = MessageBannerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if props.message.is_empty() {
            return None;
        }
        (props.keys.command_for(key) == Some(Command::DismissMessage))
            .then_some(Action::MessageClear)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let message = props.message;
        if message.is_empty() || area.height == 0 {
            return;
        }

        let (color, label) = context_style(message.context);
        let hint = if props.text_entry {
            chord_hint(props.keys, Command::DismissMessage)
        } else {
            key_hint(props.keys, Command::DismissMessage)
        };
        let dismiss = format!(" {hint} dismiss ");
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Span::styled(format!(" {label} "), Style::default().fg(color).bold()))
            .title_bottom(Line::from(dismiss).right_aligned().fg(Color::DarkGray));

        let mut lines = vec![Line::from(Span::styled(
            message.text.as_str(),
            Style::default().fg(color),
        ))];
        if let Some(detail) = &message.detail {
            lines.push(Line::from(Span::styled(
                detail.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
