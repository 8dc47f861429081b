//! Effects - side effects declared by the reducer
//!
//! The reducer never touches the network. It returns these values and
//! [`handle_effect`] turns them into tasks whose results come back as
//! actions.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use empholite_dispatch::{EffectContext, TaskKey};

use crate::action::Action;
use crate::api::ApiClient;

/// Delay between a dismiss and the dialog disappearing
pub const DIALOG_HIDE_DELAY: Duration = Duration::from_millis(100);

/// Task key of the pending dialog hide
pub const DIALOG_HIDE_TASK: &str = "dialog.hide";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// GET /ajax/list
    FetchResponses { generation: u64 },
    /// GET /ajax/check
    CheckSession { generation: u64 },
    /// POST /ajax/login with the user details as body
    Login {
        generation: u64,
        user_details: BTreeMap<String, String>,
    },
    /// POST /ajax/create with the dialog's document as body
    CreateResponse { generation: u64, document: Value },
    /// Publish `DialogHide` after [`DIALOG_HIDE_DELAY`]
    HideDialogLater,
    /// Drop a pending `HideDialogLater`
    CancelDialogHide,
}

/// Handle effects by spawning tasks
///
/// Each kind of request runs under its own task key, so a new request
/// aborts the one still in flight.
pub fn handle_effect(client: &ApiClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchResponses { generation } => {
            let client = client.clone();
            ctx.tasks().spawn("responses", async move {
                match client.list().await {
                    Ok(payload) => Action::ResponsesDidLoad {
                        generation,
                        payload,
                    },
                    Err(e) => Action::ResponsesDidFail {
                        generation,
                        failure: e.into(),
                    },
                }
            });
        }
        Effect::CheckSession { generation } => {
            let client = client.clone();
            ctx.tasks().spawn("session", async move {
                match client.check().await {
                    Ok(payload) => Action::SessionDidLoad {
                        generation,
                        payload,
                    },
                    Err(e) => Action::SessionDidFail {
                        generation,
                        failure: e.into(),
                    },
                }
            });
        }
        Effect::Login {
            generation,
            user_details,
        } => {
            let client = client.clone();
            ctx.tasks().spawn("login", async move {
                match client.login(&user_details).await {
                    Ok(redirect_uri) => Action::LoginDidRedirect {
                        generation,
                        redirect_uri,
                    },
                    Err(e) => Action::LoginDidFail {
                        generation,
                        failure: e.into(),
                    },
                }
            });
        }
        Effect::CreateResponse {
            generation,
            document,
        } => {
            let client = client.clone();
            ctx.tasks().spawn("create", async move {
                match client.create(&document).await {
                    Ok(payload) => Action::DialogDidCreate {
                        generation,
                        payload,
                    },
                    Err(e) => Action::DialogDidFail {
                        generation,
                        failure: e.into(),
                    },
                }
            });
        }
        Effect::HideDialogLater => {
            ctx.tasks()
                .debounce(DIALOG_HIDE_TASK, DIALOG_HIDE_DELAY, async { Action::DialogHide });
        }
        Effect::CancelDialogHide => {
            ctx.tasks().cancel(&TaskKey::new(DIALOG_HIDE_TASK));
        }
    }
}
