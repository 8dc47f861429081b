//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be published on the bus
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions are fanned out to every bus subscriber and logged
/// - Debug: For debugging and logging
/// - Send + 'static: Async tasks publish result actions from other threads
///
/// Use `#[derive(Action)]` from `empholite-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Category information for actions
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
/// Categories group an intent with its async results, e.g. `SessionCheck`,
/// `SessionDidLoad` and `SessionDidFail` all belong to `"session"`.
pub trait ActionCategory: Action {
    /// Enum of all categories of this action type
    type Category: Copy + Eq + Debug;

    /// Category name, `None` for uncategorized actions
    fn category(&self) -> Option<&'static str>;

    /// Category as an enum value
    fn category_enum(&self) -> Self::Category;
}
