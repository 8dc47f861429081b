//! Top-level view: lays out the components and routes key events

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use empholite_dispatch::{EventKind, EventOutcome, Keybindings};

use crate::action::Action;
use crate::components::{
    Component, Header, HeaderProps, HelpBar, HelpBarProps, LoginForm, LoginFormProps,
    MessageBanner, MessageBannerProps, ResponseDialog, ResponseDialogProps, ResponseList,
    ResponseListProps,
};
use crate::keys::{default_keybindings, Command};
use crate::state::{AppState, Page};

pub struct EmpholiteUi {
    header: Header,
    banner: MessageBanner,
    responses: ResponseList,
    dialog: ResponseDialog,
    login: LoginForm,
    help: HelpBar,
    keys: Keybindings<Command>,
}

impl Default for EmpholiteUi {
    fn default() -> Self {
        Self::new(default_keybindings())
    }
}

impl EmpholiteUi {
    pub fn new(keys: Keybindings<Command>) -> Self {
        Self {
            header: Header,
            banner: MessageBanner,
            responses: ResponseList,
            dialog: ResponseDialog::new(),
            login: LoginForm::new(),
            help: HelpBar,
            keys,
        }
    }

    pub fn keys(&self) -> &Keybindings<Command> {
        &self.keys
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [header_area, banner_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(MessageBanner::height(&state.message)),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let home = state.page == Page::Home;
        self.header.render(
            frame,
            header_area,
            HeaderProps {
                location: &state.location,
                show_create: home,
                keys: &self.keys,
            },
        );

        self.banner.render(
            frame,
            banner_area,
            MessageBannerProps {
                message: &state.message,
                keys: &self.keys,
                text_entry: !home,
            },
        );

        match state.page {
            Page::Home => self.responses.render(
                frame,
                body_area,
                ResponseListProps {
                    items: state.snapshot.get("items"),
                    loading: state.generations.responses.in_flight(),
                },
            ),
            Page::Login => self.login.render(
                frame,
                body_area,
                LoginFormProps {
                    fields: &state.login.fields,
                    focused: state.login.focused,
                    user_details: &state.snapshot.user_details,
                    snapshot: &state.snapshot,
                    keys: &self.keys,
                },
            ),
        }

        self.help.render(
            frame,
            help_area,
            HelpBarProps {
                keys: &self.keys,
                page: state.page,
                dialog_open: state.dialog.visible,
                loading: state.is_loading(),
            },
        );

        // Overlay last so it covers the page
        self.dialog.render(
            frame,
            area,
            ResponseDialogProps {
                dialog: &state.dialog,
                message: &state.message,
                keys: &self.keys,
            },
        );
    }

    /// Map a terminal event to actions
    ///
    /// The open dialog takes every key. Otherwise the page's components
    /// get the key first and global commands apply only to keys they
    /// ignore, so the login inputs can receive any character. On the login
    /// page the banner sees only what the form leaves, which is why
    /// dismissing there takes the Ctrl chord.
    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(..) = event {
            return EventOutcome::needs_render();
        }

        if state.dialog.visible {
            let props = ResponseDialogProps {
                dialog: &state.dialog,
                message: &state.message,
                keys: &self.keys,
            };
            return EventOutcome::from_actions(self.dialog.handle_event(event, props));
        }

        let actions: Vec<Action> = match state.page {
            Page::Home => {
                let header = HeaderProps {
                    location: &state.location,
                    show_create: true,
                    keys: &self.keys,
                };
                let banner = MessageBannerProps {
                    message: &state.message,
                    keys: &self.keys,
                    text_entry: false,
                };
                self.header
                    .handle_event(event, header)
                    .into_iter()
                    .chain(self.banner.handle_event(event, banner))
                    .collect()
            }
            Page::Login => {
                let props = LoginFormProps {
                    fields: &state.login.fields,
                    focused: state.login.focused,
                    user_details: &state.snapshot.user_details,
                    snapshot: &state.snapshot,
                    keys: &self.keys,
                };
                let form: Vec<Action> =
                    self.login.handle_event(event, props).into_iter().collect();
                if form.is_empty() {
                    // Chords the inputs ignore still reach the banner
                    let banner = MessageBannerProps {
                        message: &state.message,
                        keys: &self.keys,
                        text_entry: true,
                    };
                    self.banner.handle_event(event, banner).into_iter().collect()
                } else {
                    form
                }
            }
        };
        if !actions.is_empty() {
            return EventOutcome::from_actions(actions);
        }

        let EventKind::Key(key) = event else {
            return EventOutcome::ignored();
        };
        match self.keys.command_for(key) {
            Some(Command::Quit) => Some(Action::Quit).into(),
            Some(Command::Refresh) => Some(match state.page {
                Page::Home => Action::ResponsesFetch,
                Page::Login => Action::SessionCheck,
            })
            .into(),
            _ => EventOutcome::ignored(),
        }
    }
}
