//! empholite-dispatch: centralized state management for the empholite client
//!
//! Components are pure functions of state. Every change goes through an
//! action published on the [`ActionBus`]; the store's reducer applies it and
//! may ask for effects, which the runtime hands to the application.
//!
//! # Example
//! ```ignore
//! use empholite_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum Action {
//!     ResponsesFetch,
//!     MessageClear,
//!     Quit,
//! }
//!
//! let bus = ActionBus::new();
//! let mut sub = bus.subscribe();
//! bus.publish(Action::ResponsesFetch);
//! assert!(sub.try_recv().is_some_and(|a| a.is_responses()));
//! ```

pub use empholite_dispatch_core::*;

pub use empholite_dispatch_core::{
    assert_category_emitted, assert_emitted, assert_not_emitted, count_emitted, find_emitted,
};

pub use empholite_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use empholite_dispatch_core::prelude::*;
    pub use empholite_dispatch_macros::Action;
}
