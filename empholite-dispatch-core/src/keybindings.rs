//! Key strings and command bindings
//!
//! Keys are written as strings ("q", "esc", "ctrl+s", "shift+tab") so that
//! bindings read the same in code, in help text and in tests.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" on its own is a key, not a separator
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display ("ctrl+s" -> "^S", "esc" -> "Esc")
pub fn format_key_for_display(key_str: &str) -> String {
    let key_str = key_str.trim().to_lowercase();
    if key_str == "shift+tab" || key_str == "backtab" {
        return "Shift+Tab".to_string();
    }

    let mut parts: Vec<&str> = key_str.split('+').collect();
    let key_part = parts.pop().unwrap_or_default();

    let prefix: String = parts
        .iter()
        .map(|part| match part.trim() {
            "ctrl" | "control" => "^",
            "shift" => "Shift+",
            "alt" => "Alt+",
            _ => "",
        })
        .collect();

    let key_display = match key_part {
        "esc" | "escape" => "Esc".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Backspace".to_string(),
        "pageup" => "PgUp".to_string(),
        "pagedown" => "PgDn".to_string(),
        "delete" => "Del".to_string(),
        "space" => "Space".to_string(),
        f if f.len() > 1 && f.starts_with('f') && f[1..].parse::<u8>().is_ok() => f.to_uppercase(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    };

    format!("{prefix}{key_display}")
}

/// Whether `event` is the key described by `key_str`
///
/// Shift is ignored for character keys: terminals disagree on whether an
/// uppercase letter carries the SHIFT modifier.
pub fn key_matches(event: &KeyEvent, key_str: &str) -> bool {
    let Some(expected) = parse_key_string(key_str) else {
        return false;
    };

    match (event.code, expected.code) {
        (KeyCode::Char(actual), KeyCode::Char(wanted)) => {
            actual.to_ascii_lowercase() == wanted
                && event.modifiers - KeyModifiers::SHIFT == expected.modifiers - KeyModifiers::SHIFT
        }
        (actual, wanted) => actual == wanted && event.modifiers == expected.modifiers,
    }
}

/// Commands bound to one or more key strings
///
/// Generic over the application's command type. Order of insertion is
/// kept, which is also the order help text is rendered in.
#[derive(Debug, Clone)]
pub struct Keybindings<C> {
    bindings: Vec<(C, Vec<String>)>,
}

impl<C> Default for Keybindings<C> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<C: Copy + PartialEq> Keybindings<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `command` to `keys`, replacing any previous binding
    pub fn bind<I, S>(mut self, command: C, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        match self.bindings.iter_mut().find(|(c, _)| *c == command) {
            Some((_, existing)) => *existing = keys,
            None => self.bindings.push((command, keys)),
        }
        self
    }

    /// Look up the command for a key event
    pub fn command_for(&self, event: &KeyEvent) -> Option<C> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| key_matches(event, k)))
            .map(|(command, _)| *command)
    }

    /// First key string bound to `command`
    pub fn first_key(&self, command: C) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == command)
            .and_then(|(_, keys)| keys.first())
            .map(String::as_str)
    }

    /// All bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (C, &[String])> {
        self.bindings.iter().map(|(c, keys)| (*c, keys.as_slice()))
    }
}
