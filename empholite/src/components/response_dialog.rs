//! Response-creation dialog
//!
//! A modal with a JSON editor and a Create button. Closing goes through
//! `DialogDismiss`, which hides the dialog after a short delay. The modal
//! covers the banner, so the current message is repeated above the footer.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use empholite_components::{centered_rect, render_modal, ModalStyle, TextArea, TextAreaProps};
use empholite_dispatch::{EventKind, Keybindings};

use super::message_banner::context_style;
use super::{key_hint, Component};
use crate::action::Action;
use crate::keys::Command;
use crate::state::{DialogState, Message};

pub const DIALOG_TITLE: &str = " Create a Response ";
pub const EDITOR_LABEL: &str = " TextArea for JSON ";
pub const CREATE_BUTTON: &str = "[ Create ]";

const WIDTH: u16 = 64;
const HEIGHT: u16 = 18;

pub struct ResponseDialog {
    editor: TextArea,
    was_visible: bool,
}

pub struct ResponseDialogProps<'a> {
    pub dialog: &'a DialogState,
    pub message: &'a Message,
    pub keys: &'a Keybindings<Command>,
}

impl ResponseDialog {
    pub fn new() -> Self {
        Self {
            editor: TextArea::new(),
            was_visible: false,
        }
    }

    fn editor_props<'a>(dialog: &'a DialogState) -> TextAreaProps<'a, Action> {
        TextAreaProps {
            value: &dialog.draft,
            label: EDITOR_LABEL,
            is_focused: true,
            error: dialog.error.as_deref(),
            on_change: Action::DialogDraftUpdate,
        }
    }
}

impl Default for ResponseDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component<Action> for ResponseDialog {
    type Props<'a> = ResponseDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.dialog.visible {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match props.keys.command_for(key) {
            Some(Command::DismissDialog) => vec![Action::DialogDismiss],
            Some(Command::SubmitDialog) => vec![Action::DialogSubmit],
            _ => Component::<Action>::handle_event(
                &mut self.editor,
                event,
                Self::editor_props(props.dialog),
            )
            .into_iter()
            .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let visible = props.dialog.visible;
        if visible && !self.was_visible {
            self.editor.reset();
        }
        self.was_visible = visible;
        if !visible {
            return;
        }

        let modal = centered_rect(WIDTH, HEIGHT, area);
        let inner = render_modal(frame, modal, DIALOG_TITLE, &ModalStyle::default());

        let message = props.message;
        let message_rows = match (message.is_empty(), &message.detail) {
            (true, _) => 0,
            (false, None) => 2,
            (false, Some(_)) => 3,
        };
        let rows = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(message_rows),
            Constraint::Length(1),
        ])
        .split(inner);
        Component::<Action>::render(
            &mut self.editor,
            frame,
            rows[0],
            Self::editor_props(props.dialog),
        );

        if !message.is_empty() {
            let (color, label) = context_style(message.context);
            let mut lines = vec![Line::from(vec![
                Span::styled(format!(" {label}: "), Style::default().fg(color).bold()),
                Span::styled(message.text.as_str(), Style::default().fg(color)),
            ])];
            if let Some(detail) = &message.detail {
                lines.push(Line::styled(
                    format!(" {detail}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[1]);
        }

        let footer = Line::from(vec![
            Span::styled(
                format!(" {} close ", key_hint(props.keys, Command::DismissDialog)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(CREATE_BUTTON, Style::default().fg(Color::Green).bold()),
            Span::styled(
                format!(" ({}) ", key_hint(props.keys, Command::SubmitDialog)),
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(footer), rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::default_keybindings;
    use empholite_dispatch::testing::{key_press, RenderHarness};

    fn visible(draft: &str) -> DialogState {
        DialogState {
            visible: true,
            draft: draft.into(),
            error: None,
        }
    }

    fn send(dialog: &mut ResponseDialog, state: &DialogState, k: &str) -> Vec<Action> {
        let keys = default_keybindings();
        let message = Message::default();
        let props = ResponseDialogProps {
            dialog: state,
            message: &message,
            keys: &keys,
        };
        dialog.handle_event(&key_press(k), props).into_iter().collect()
    }

    fn render(state: &DialogState, message: &Message) -> String {
        let keys = default_keybindings();
        let mut dialog = ResponseDialog::new();
        let mut render = RenderHarness::new(80, 24);
        render.render_to_string_plain(|frame, area| {
            let props = ResponseDialogProps {
                dialog: state,
                message,
                keys: &keys,
            };
            dialog.render(frame, area, props);
        })
    }

    #[test]
    fn test_typing_updates_draft() {
        let mut dialog = ResponseDialog::new();
        assert_eq!(
            send(&mut dialog, &visible(""), "{"),
            vec![Action::DialogDraftUpdate("{".into())]
        );
    }

    #[test]
    fn test_global_keys_are_typed_into_editor() {
        let mut dialog = ResponseDialog::new();
        assert_eq!(
            send(&mut dialog, &visible(""), "q"),
            vec![Action::DialogDraftUpdate("q".into())]
        );
    }

    #[test]
    fn test_submit_and_dismiss() {
        let mut dialog = ResponseDialog::new();
        let state = visible("{}");
        assert_eq!(send(&mut dialog, &state, "ctrl+s"), vec![Action::DialogSubmit]);
        assert_eq!(send(&mut dialog, &state, "esc"), vec![Action::DialogDismiss]);
    }

    #[test]
    fn test_hidden_dialog_ignores_keys() {
        let mut dialog = ResponseDialog::new();
        assert!(send(&mut dialog, &DialogState::default(), "a").is_empty());
    }

    #[test]
    fn test_render_visible() {
        let state = DialogState {
            error: Some("Payload must be valid JSON!".into()),
            ..visible("{\"path\": \"/users\"}")
        };

        let output = render(&state, &Message::default());

        assert!(output.contains("Create a Response"));
        assert!(output.contains("TextArea for JSON"));
        assert!(output.contains("\"path\": \"/users\""));
        assert!(output.contains("[ Create ] (^S)"));
        assert!(output.contains("Payload must be valid JSON!"));
    }

    #[test]
    fn test_render_hidden_draws_nothing() {
        let output = render(&DialogState::default(), &Message::danger("Not found."));
        assert!(output.trim().is_empty());
    }

    #[test]
    fn test_render_shows_current_message() {
        let message = Message::danger("Problem creating response.")
            .with_detail(Some("Malformed response, <html>".into()));

        let output = render(&visible("{}"), &message);

        assert!(output.contains("danger: Problem creating response."));
        assert!(output.contains("Malformed response, <html>"));
        assert!(output.contains("[ Create ] (^S)"));
    }
}
