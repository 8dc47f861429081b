//! Dispatch middleware
//!
//! Middleware observes actions on their way through a store. It cannot
//! change or drop them.

use crate::action::Action;

/// Hooks called around every dispatch
pub trait Middleware<A: Action> {
    /// Called before the reducer runs
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Logs every dispatched action through `tracing`
///
/// Action names are logged at debug level. With `with_payloads`, the full
/// `Debug` rendering is logged at trace level as well.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Log before the reducer runs
    pub log_before: bool,
    /// Log after the reducer ran
    pub log_after: bool,
    /// Include the action's Debug output
    pub with_payloads: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            with_payloads: false,
        }
    }

    /// Log both sides of the dispatch, payloads included
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
            with_payloads: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
        if self.with_payloads {
            tracing::trace!(action = ?action, "Action payload");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed,
                "Action processed"
            );
        }
    }
}
