//! Login page: session probe result plus one input per user-detail field

use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use empholite_components::{TextInput, TextInputProps};
use empholite_dispatch::{EventKind, Keybindings};

use super::Component;
use crate::action::Action;
use crate::keys::Command;
use crate::state::Snapshot;

const STATUS_HEIGHT: u16 = 6;
const INPUT_HEIGHT: u16 = 3;

/// What a field input reported; mapped to an [`Action`] by the form
#[derive(Debug, Clone, PartialEq)]
enum FieldEdit {
    Change(String),
    Submit,
}

fn submit(_: String) -> FieldEdit {
    FieldEdit::Submit
}

#[derive(Default)]
pub struct LoginForm {
    inputs: Vec<TextInput>,
}

pub struct LoginFormProps<'a> {
    /// Field names in display order
    pub fields: &'a [String],
    pub focused: usize,
    pub user_details: &'a BTreeMap<String, String>,
    pub snapshot: &'a Snapshot,
    pub keys: &'a Keybindings<Command>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status rows plus the inputs
    pub fn height(fields: usize) -> u16 {
        STATUS_HEIGHT + fields as u16 * INPUT_HEIGHT
    }

    fn sync_inputs(&mut self, fields: usize) {
        self.inputs.resize_with(fields, TextInput::new);
    }

    /// Forward a key to the focused input
    fn edit_focused(&mut self, event: &EventKind, props: &LoginFormProps<'_>) -> Option<Action> {
        self.sync_inputs(props.fields.len());
        let field = props.fields.get(props.focused)?;
        let input = self.inputs.get_mut(props.focused)?;
        let value = props
            .user_details
            .get(field)
            .map(String::as_str)
            .unwrap_or_default();
        let label = field_label(field);

        let edit = Component::<FieldEdit>::handle_event(
            input,
            event,
            input_props(field, &label, value, true),
        )
        .into_iter()
        .next()?;

        Some(match edit {
            FieldEdit::Change(value) => Action::UserDetailUpdate {
                name: field.clone(),
                value,
            },
            FieldEdit::Submit => Action::LoginSubmit,
        })
    }
}

fn is_secret(field: &str) -> bool {
    field.to_lowercase().contains("password")
}

fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    let label: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!(" {label} ")
}

fn input_props<'a>(
    field: &'a str,
    label: &'a str,
    value: &'a str,
    is_focused: bool,
) -> TextInputProps<'a, FieldEdit> {
    TextInputProps {
        value,
        label,
        placeholder: "",
        is_focused,
        masked: is_secret(field),
        on_change: FieldEdit::Change,
        on_submit: submit,
    }
}

fn yes_no(flag: bool) -> Span<'static> {
    if flag {
        Span::styled("yes", Style::default().fg(Color::Green))
    } else {
        Span::styled("no", Style::default().fg(Color::DarkGray))
    }
}

impl Component<Action> for LoginForm {
    type Props<'a> = LoginFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        match props.keys.command_for(key) {
            Some(Command::NextField) => return Some(Action::LoginFocusNext),
            Some(Command::PrevField) => return Some(Action::LoginFocusPrev),
            Some(Command::Login) => return Some(Action::LoginSubmit),
            _ => {}
        }

        self.edit_focused(event, &props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync_inputs(props.fields.len());

        let mut constraints = vec![Constraint::Length(STATUS_HEIGHT)];
        constraints.extend(props.fields.iter().map(|_| Constraint::Length(INPUT_HEIGHT)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(area);

        let snapshot = props.snapshot;
        let session = if snapshot.has_session {
            Span::styled("active", Style::default().fg(Color::Green).bold())
        } else {
            Span::styled("none", Style::default().fg(Color::Yellow).bold())
        };
        let sign_out = if snapshot.sign_out_urls.is_empty() {
            Span::styled("-", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(snapshot.sign_out_urls.join(", "))
        };
        let status = vec![
            Line::from(vec![Span::raw("Session: "), session]),
            Line::from(vec![
                Span::raw("Profile in request: "),
                yes_no(snapshot.profile_in_request),
            ]),
            Line::from(vec![
                Span::raw("Profile in session: "),
                yes_no(snapshot.profile_in_session),
            ]),
            Line::from(vec![Span::raw("Sign out: "), sign_out]),
        ];
        let status_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" SSO ");
        frame.render_widget(Paragraph::new(status).block(status_block), rows[0]);

        for (i, (field, input)) in props.fields.iter().zip(self.inputs.iter_mut()).enumerate() {
            let value = props
                .user_details
                .get(field)
                .map(String::as_str)
                .unwrap_or_default();
            let label = field_label(field);
            Component::<FieldEdit>::render(
                input,
                frame,
                rows[i + 1],
                input_props(field, &label, value, i == props.focused),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::default_keybindings;
    use empholite_dispatch::testing::{key_press, RenderHarness};

    struct Fixture {
        fields: Vec<String>,
        details: BTreeMap<String, String>,
        snapshot: Snapshot,
        keys: Keybindings<Command>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                fields: vec!["username".into(), "password".into()],
                details: BTreeMap::new(),
                snapshot: Snapshot::default(),
                keys: default_keybindings(),
            }
        }

        fn props(&self, focused: usize) -> LoginFormProps<'_> {
            LoginFormProps {
                fields: &self.fields,
                focused,
                user_details: &self.details,
                snapshot: &self.snapshot,
                keys: &self.keys,
            }
        }
    }

    fn send(form: &mut LoginForm, props: LoginFormProps<'_>, k: &str) -> Vec<Action> {
        form.handle_event(&key_press(k), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_updates_focused_field() {
        let fixture = Fixture::new();
        let mut form = LoginForm::new();

        assert_eq!(
            send(&mut form, fixture.props(1), "s"),
            vec![Action::UserDetailUpdate {
                name: "password".into(),
                value: "s".into()
            }]
        );
    }

    #[test]
    fn test_tab_and_enter() {
        let fixture = Fixture::new();
        let mut form = LoginForm::new();

        assert_eq!(send(&mut form, fixture.props(0), "tab"), vec![Action::LoginFocusNext]);
        assert_eq!(
            send(&mut form, fixture.props(0), "shift+tab"),
            vec![Action::LoginFocusPrev]
        );
        assert_eq!(send(&mut form, fixture.props(0), "enter"), vec![Action::LoginSubmit]);
    }

    #[test]
    fn test_render_masks_password() {
        let mut fixture = Fixture::new();
        fixture.details.insert("username".into(), "alice".into());
        fixture.details.insert("password".into(), "hunter2".into());
        fixture.snapshot.sign_out_urls = vec!["https://sso/logout".into()];
        let mut form = LoginForm::new();
        let mut render = RenderHarness::new(60, LoginForm::height(2));

        let output = render.render_to_string_plain(|frame, area| {
            form.render(frame, area, fixture.props(0));
        });

        assert!(output.contains("Session: none"));
        assert!(output.contains("https://sso/logout"));
        assert!(output.contains("Username"));
        assert!(output.contains("alice"));
        assert!(output.contains("*******"));
        assert!(!output.contains("hunter2"));
    }
}
