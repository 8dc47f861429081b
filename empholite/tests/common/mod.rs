//! Shared test utilities

#![allow(dead_code)]

pub mod mock_backend;

use std::time::Duration;

use empholite::action::Action;
use empholite::api::ApiClient;
use empholite::effect::{handle_effect, Effect};
use empholite::reducer::reducer;
use empholite::state::AppState;
use empholite_dispatch::EffectRuntime;

pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

pub type Runtime = EffectRuntime<AppState, Action, Effect>;

pub fn runtime(state: AppState) -> Runtime {
    EffectRuntime::new(state, reducer)
}

pub fn client(backend: &MockBackend) -> ApiClient {
    ApiClient::new(backend.base_url(), Duration::from_secs(5)).expect("client")
}

/// Dispatch actions from the bus until `done` accepts one
///
/// Returns every action dispatched, the accepted one last.
pub async fn run_until<F>(runtime: &mut Runtime, client: &ApiClient, mut done: F) -> Vec<Action>
where
    F: FnMut(&Action) -> bool,
{
    let mut seen = Vec::new();
    let finished = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(action) = runtime
            .next(|effect, ctx| handle_effect(client, effect, ctx))
            .await
        {
            let stop = done(&action);
            seen.push(action);
            if stop {
                return true;
            }
        }
        false
    })
    .await;

    assert_eq!(finished, Ok(true), "gave up waiting, dispatched: {seen:?}");
    seen
}
