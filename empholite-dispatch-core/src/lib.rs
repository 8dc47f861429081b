//! Core traits and types for the empholite client runtime
//!
//! The runtime follows a Redux/Elm-style loop:
//!
//! - **Action**: a plain value describing an intent or a result
//! - **ActionBus**: publish/subscribe delivery of actions to any number of
//!   listeners, each with its own queue
//! - **EffectStore**: state plus a reducer that returns effects to run
//! - **TaskManager**: keyed async work whose results come back as actions
//! - **Component**: pure UI element rendering from props, emitting actions
//!
//! # Async pattern
//!
//! Intents start work and results carry the outcome back:
//!
//! ```ignore
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum Action {
//!     ResponsesFetch,
//!     ResponsesDidLoad { generation: u64, payload: Map<String, Value> },
//!     ResponsesDidFail { generation: u64, failure: Failure },
//! }
//! ```
//!
//! The reducer turns `ResponsesFetch` into an effect, the effect handler
//! spawns a task through [`EffectContext::tasks`], and the task's action is
//! published on the bus where the store picks it up. `Did*` names mark
//! result actions; `#[action(infer_categories)]` groups all three above
//! under `"responses"`.

pub mod action;
pub mod bus;
pub mod component;
pub mod effect;
pub mod event;
pub mod keybindings;
pub mod middleware;
pub mod runtime;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionCategory};
pub use bus::{ActionBus, SubscriberId, Subscription};
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
pub use keybindings::{format_key_for_display, key_matches, parse_key_string, Keybindings};
pub use middleware::{LoggingMiddleware, Middleware, NoopMiddleware};
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome};
pub use tasks::{TaskKey, TaskManager};

pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, key, key_press, type_text, RenderHarness,
    TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory};
    pub use crate::bus::{ActionBus, Subscription};
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
    pub use crate::event::EventKind;
    pub use crate::keybindings::{format_key_for_display, key_matches, Keybindings};
    pub use crate::middleware::{LoggingMiddleware, Middleware};
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::tasks::{TaskKey, TaskManager};

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
