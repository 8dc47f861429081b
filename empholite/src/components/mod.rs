pub mod header;
pub mod help_bar;
pub mod login_form;
pub mod message_banner;
pub mod response_dialog;
pub mod response_list;

// Re-export core Component trait
pub use empholite_dispatch::Component;

pub use header::{Header, HeaderProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use login_form::{LoginForm, LoginFormProps};
pub use message_banner::{MessageBanner, MessageBannerProps};
pub use response_dialog::{ResponseDialog, ResponseDialogProps};
pub use response_list::{ResponseList, ResponseListProps};

use empholite_dispatch::{format_key_for_display, Keybindings};

use crate::keys::Command;

/// Display form of the first key bound to `command`
pub(crate) fn key_hint(keys: &Keybindings<Command>, command: Command) -> String {
    keys.first_key(command)
        .map(format_key_for_display)
        .unwrap_or_default()
}

/// Like [`key_hint`], but prefers a Ctrl chord
///
/// Focused text inputs take plain characters, so views that have them
/// advertise the chord. Commands without one fall back to the first key.
pub(crate) fn chord_hint(keys: &Keybindings<Command>, command: Command) -> String {
    keys.iter()
        .find(|(bound, _)| *bound == command)
        .and_then(|(_, strings)| strings.iter().find(|k| k.starts_with("ctrl+")))
        .map(|k| format_key_for_display(k))
        .unwrap_or_else(|| key_hint(keys, command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::default_keybindings;

    #[test]
    fn test_chord_hint_prefers_ctrl() {
        let keys = default_keybindings();
        assert_eq!(key_hint(&keys, Command::Quit), "Q");
        assert_eq!(chord_hint(&keys, Command::Quit), "^C");
        assert_eq!(chord_hint(&keys, Command::DismissMessage), "^X");
        assert_eq!(chord_hint(&keys, Command::Login), "Enter");
    }
}
