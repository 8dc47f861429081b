//! Empholite - terminal client for the service-mocking backend
//!
//! The client follows the dispatch loop of `empholite-dispatch`:
//! 1. Key press -> component `handle_event()` -> actions on the bus
//! 2. The runtime's store receives each action and runs the reducer
//! 3. The reducer updates [`state::AppState`] and returns [`effect::Effect`]s
//! 4. [`effect::handle_effect`] runs HTTP calls through the task manager
//! 5. Their results come back as `*Did*` actions; changed state re-renders
//!
//! Only the reducer mutates state, and only effect tasks touch the network.

pub mod action;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod effect;
pub mod keys;
pub mod logging;
pub mod reducer;
pub mod state;
