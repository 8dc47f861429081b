//! Key bindings

use empholite_dispatch::Keybindings;

/// Commands reachable from the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the response dialog
    CreateResponse,
    DismissMessage,
    /// Reload the current page's data
    Refresh,
    Quit,
    SubmitDialog,
    DismissDialog,
    NextField,
    PrevField,
    Login,
}

impl Command {
    /// Short label for the help bar
    pub fn label(self) -> &'static str {
        match self {
            Command::CreateResponse => "create new",
            Command::DismissMessage => "dismiss",
            Command::Refresh => "refresh",
            Command::Quit => "quit",
            Command::SubmitDialog => "create",
            Command::DismissDialog => "close",
            Command::NextField => "next field",
            Command::PrevField => "prev field",
            Command::Login => "log in",
        }
    }
}

pub fn default_keybindings() -> Keybindings<Command> {
    Keybindings::new()
        .bind(Command::CreateResponse, ["n"])
        .bind(Command::DismissMessage, ["x", "ctrl+x"])
        .bind(Command::Refresh, ["r", "f5"])
        .bind(Command::Quit, ["q", "ctrl+c"])
        .bind(Command::SubmitDialog, ["ctrl+s"])
        .bind(Command::DismissDialog, ["esc"])
        .bind(Command::NextField, ["tab", "down"])
        .bind(Command::PrevField, ["shift+tab", "up"])
        .bind(Command::Login, ["enter"])
}
