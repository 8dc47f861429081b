//! Test utilities
//!
//! - [`key`] and friends build key events from strings (`key("ctrl+s")`)
//! - [`TestHarness`] captures actions published on a bus
//! - [`RenderHarness`] renders into an in-memory terminal
//! - `assert_emitted!` and related macros check captured actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::bus::{ActionBus, Subscription};
use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::{Action, ActionCategory};

/// Build a `KeyEvent` from a key string
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

/// Key press event wrapped as an [`EventKind`]
pub fn key_press(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Character key without modifiers
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Character key with Ctrl held
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// One key event per character of `text`, for typing into inputs
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Captures everything published on a bus
///
/// ```ignore
/// let mut harness = TestHarness::<AppState, Action>::new(AppState::default());
/// harness.bus().publish(Action::ResponsesFetch);
/// let emitted = harness.drain_emitted();
/// assert_emitted!(emitted, Action::ResponsesFetch);
/// ```
pub struct TestHarness<S, A: Action> {
    /// State under test
    pub state: S,
    bus: ActionBus<A>,
    capture: Subscription<A>,
    held: Vec<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let bus = ActionBus::new();
        let capture = bus.subscribe();
        Self {
            state,
            bus,
            capture,
            held: Vec::new(),
        }
    }

    /// The bus being captured; clone it into code under test
    pub fn bus(&self) -> &ActionBus<A> {
        &self.bus
    }

    /// Publish an action, as a handler would
    pub fn emit(&self, action: A) {
        self.bus.publish(action);
    }

    /// Publish every action a component returned
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.bus.publish(action);
        }
    }

    /// Take all captured actions
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = std::mem::take(&mut self.held);
        actions.extend(self.capture.drain());
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Take captured actions of one category; the rest stay queued
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|a| a.category() == Some(category));

        self.held = rest;
        matching
    }
}

/// Renders into a `TestBackend` and exposes the result as text
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// A harness with a `width` x `height` terminal
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame, Rect),
    {
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area);
            })
            .unwrap_or_else(|e| panic!("test draw: {e}"));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return it as plain text, one line per row
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame, Rect),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Buffer contents without styling, trailing spaces trimmed per row
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assert that an action matching a pattern was emitted
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// First action matching a pattern
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Number of actions matching a pattern
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that an action of the given category was emitted
#[macro_export]
macro_rules! assert_category_emitted {
    ($actions:expr, $category:expr) => {
        assert!(
            $actions.iter().any(|a| {
                use $crate::ActionCategory;
                a.category() == Some($category)
            }),
            "Expected action with category `{}` to be emitted, but got: {:?}",
            $category,
            $actions
        );
    };
}
