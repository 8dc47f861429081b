use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use empholite_dispatch::Keybindings;

use super::{chord_hint, key_hint, Component};
use crate::action::Action;
use crate::keys::Command;
use crate::state::Page;

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keys: &'a Keybindings<Command>,
    pub page: Page,
    pub dialog_open: bool,
    pub loading: bool,
}

impl HelpBar {
    /// Commands that make sense in the current view
    pub fn commands(page: Page, dialog_open: bool) -> &'static [Command] {
        match (page, dialog_open) {
            (_, true) => &[Command::SubmitDialog, Command::DismissDialog],
            (Page::Home, false) => &[
                Command::CreateResponse,
                Command::Refresh,
                Command::DismissMessage,
                Command::Quit,
            ],
            (Page::Login, false) => &[
                Command::NextField,
                Command::Login,
                Command::DismissMessage,
                Command::Quit,
            ],
        }
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        if props.loading {
            spans.push(Span::styled(" loading… ", Style::default().fg(Color::Yellow)));
        }
        let text_entry = props.dialog_open || props.page == Page::Login;
        for command in Self::commands(props.page, props.dialog_open) {
            let hint = if text_entry {
                chord_hint(props.keys, *command)
            } else {
                key_hint(props.keys, *command)
            };
            spans.push(Span::styled(
                format!(" {hint}"),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {} ", command.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
