use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use empholite_dispatch::{EventKind, Keybindings};

use super::{key_hint, Component};
use crate::action::Action;
use crate::keys::Command;

pub const TITLE: &str = "Welcome to Empholite";
pub const SUBTITLE: &str = "Mock any RESTful service";
pub const CREATE_BUTTON: &str = "[+] create new";

/// Welcome header with the create button
pub struct Header;

pub struct HeaderProps<'a> {
    /// Current navigation target
    pub location: &'a str,
    /// Offer the create button (home page only)
    pub show_create: bool,
    pub keys: &'a Keybindings<Command>,
}

impl Header {
    pub const HEIGHT: u16 = 3;

    fn is_create(key: &KeyEvent, props: &HeaderProps<'_>) -> bool {
        props.show_create && props.keys.command_for(key) == Some(Command::CreateResponse)
    }
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) if Self::is_create(key, &props) => Some(Action::DialogShow),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let title = Line::from(Span::styled(TITLE, Style::default().fg(Color::White).bold()))
            .centered();
        frame.render_widget(Paragraph::new(title), rows[0]);

        let subtitle = Line::from(Span::styled(
            SUBTITLE,
            Style::default().fg(Color::DarkGray).italic(),
        ))
        .centered();
        frame.render_widget(Paragraph::new(subtitle), rows[1]);

        let columns =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).split(rows[2]);

        let location = Line::from(vec![
            Span::styled(" @ ", Style::default().fg(Color::DarkGray)),
            Span::styled(props.location, Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(location), columns[0]);

        if props.show_create {
            let button = Line::from(vec![
                Span::styled(CREATE_BUTTON, Style::default().fg(Color::Green).bold()),
                Span::styled(
                    format!(" ({}) ", key_hint(props.keys, Command::CreateResponse)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
            .right_aligned();
            frame.render_widget(Paragraph::new(button), columns[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::default_keybindings;
    use empholite_dispatch::testing::{key_press, RenderHarness};

    #[test]
    fn test_create_key_opens_dialog() {
        let keys = default_keybindings();
        let mut header = Header;
        let props = HeaderProps {
            location: "/",
            show_create: true,
            keys: &keys,
        };

        let actions: Vec<_> = header
            .handle_event(&key_press("n"), props)
            .into_iter()
            .collect();

        assert_eq!(actions, vec![Action::DialogShow]);
    }

    #[test]
    fn test_create_key_ignored_without_button() {
        let keys = default_keybindings();
        let mut header = Header;
        let props = HeaderProps {
            location: "/",
            show_create: false,
            keys: &keys,
        };

        let actions: Vec<_> = header
            .handle_event(&key_press("n"), props)
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_title_and_button() {
        let keys = default_keybindings();
        let mut render = RenderHarness::new(60, Header::HEIGHT);

        let output = render.render_to_string_plain(|frame, area| {
            let props = HeaderProps {
                location: "/home",
                show_create: true,
                keys: &keys,
            };
            Header.render(frame, area, props);
        });

        assert!(output.contains(TITLE));
        assert!(output.contains(SUBTITLE));
        assert!(output.contains("/home"));
        assert!(output.contains("[+] create new (N)"));
    }
}
