//! Reducer - (state, action) -> (changed, effects)
//!
//! All state mutations happen here. Request intents clear the banner, start
//! a new generation and hand the request to the effect handler; results
//! from an older generation are dropped without touching state.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use empholite_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Failure, Generation, Message, Page};

pub const FETCH_RESPONSES_FAILED: &str = "Problem fetching responses.";
pub const CHECK_SESSION_FAILED: &str = "Problem checking validity.";
pub const LOGIN_FAILED: &str = "Problem logging in.";
pub const CREATE_RESPONSE_FAILED: &str = "Problem creating response.";
pub const SESSION_EXPIRED: &str =
    "Your session has logged out or expired, try restarting your SSO attempt.";
pub const RESPONSE_CREATED: &str = "Response created.";
pub const INVALID_JSON: &str = "Payload must be valid JSON!";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Responses =====
        Action::ResponsesFetch => fetch_responses(state),

        Action::ResponsesDidLoad {
            generation,
            payload,
        } => {
            if !settle(&mut state.generations.responses, generation, "responses") {
                return DispatchResult::unchanged();
            }
            merge_payload(state, payload, FETCH_RESPONSES_FAILED);
            DispatchResult::changed()
        }

        Action::ResponsesDidFail {
            generation,
            failure,
        } => {
            if !settle(&mut state.generations.responses, generation, "responses") {
                return DispatchResult::unchanged();
            }
            state.message = failure.into_message(FETCH_RESPONSES_FAILED);
            DispatchResult::changed()
        }

        // ===== Session =====
        Action::SessionCheck => {
            state.message = Message::default();
            let generation = state.generations.session.next();
            DispatchResult::changed_with(Effect::CheckSession { generation })
        }

        Action::SessionDidLoad {
            generation,
            payload,
        } => {
            if !settle(&mut state.generations.session, generation, "session") {
                return DispatchResult::unchanged();
            }
            if merge_payload(state, payload, CHECK_SESSION_FAILED)
                && !state.snapshot.display_login
                && !state.snapshot.has_session
            {
                state.message = Message::warning(SESSION_EXPIRED);
            }
            DispatchResult::changed()
        }

        Action::SessionDidFail {
            generation,
            failure,
        } => {
            if !settle(&mut state.generations.session, generation, "session") {
                return DispatchResult::unchanged();
            }
            state.message = failure.into_message(CHECK_SESSION_FAILED);
            DispatchResult::changed()
        }

        // ===== Login =====
        Action::LoginSubmit => {
            state.message = Message::default();
            let generation = state.generations.login.next();
            DispatchResult::changed_with(Effect::Login {
                generation,
                user_details: state.snapshot.user_details.clone(),
            })
        }

        Action::LoginDidRedirect {
            generation,
            redirect_uri,
        } => {
            if !settle(&mut state.generations.login, generation, "login") {
                return DispatchResult::unchanged();
            }
            debug!(location = %redirect_uri, "Following login redirect");
            state.location = redirect_uri;
            state.page = Page::Home;
            // The home page loads its data on mount
            fetch_responses(state)
        }

        Action::LoginDidFail {
            generation,
            failure,
        } => {
            if !settle(&mut state.generations.login, generation, "login") {
                return DispatchResult::unchanged();
            }
            state.message = failure.into_message(LOGIN_FAILED);
            DispatchResult::changed()
        }

        Action::LoginFocusNext => cycle_login_focus(state, 1),
        Action::LoginFocusPrev => cycle_login_focus(state, -1),

        Action::UserDetailUpdate { name, value } => {
            if state.snapshot.user_details.get(&name) == Some(&value) {
                return DispatchResult::unchanged();
            }
            state.snapshot.user_details.insert(name, value);
            DispatchResult::changed()
        }

        // ===== Dialog =====
        Action::DialogShow => {
            state.message = Message::default();
            state.dialog.visible = true;
            state.dialog.error = None;
            // A dismiss still waiting on its delay must not hide the reopened dialog
            DispatchResult::changed_with(Effect::CancelDialogHide)
        }

        Action::DialogDismiss => {
            if !state.dialog.visible {
                return DispatchResult::unchanged();
            }
            DispatchResult::effect(Effect::HideDialogLater)
        }

        Action::DialogHide => {
            if !state.dialog.visible {
                return DispatchResult::unchanged();
            }
            state.dialog.visible = false;
            DispatchResult::changed()
        }

        Action::DialogDraftUpdate(draft) => {
            state.dialog.draft = draft;
            state.dialog.error = None;
            DispatchResult::changed()
        }

        Action::DialogSubmit => {
            if !state.dialog.visible {
                return DispatchResult::unchanged();
            }
            let document = match serde_json::from_str::<Value>(&state.dialog.draft) {
                Ok(document) => document,
                Err(e) => {
                    debug!(error = %e, "Rejected response draft");
                    state.dialog.error = Some(INVALID_JSON.into());
                    return DispatchResult::changed();
                }
            };
            state.dialog.error = None;
            state.message = Message::default();
            let generation = state.generations.create.next();
            DispatchResult::changed_with(Effect::CreateResponse {
                generation,
                document,
            })
        }

        Action::DialogDidCreate {
            generation,
            payload,
        } => {
            if !settle(&mut state.generations.create, generation, "create") {
                return DispatchResult::unchanged();
            }
            if merge_payload(state, payload, CREATE_RESPONSE_FAILED) {
                state.dialog.visible = false;
                state.dialog.draft.clear();
                state.message = Message::success(RESPONSE_CREATED);
            }
            DispatchResult::changed()
        }

        Action::DialogDidFail {
            generation,
            failure,
        } => {
            if !settle(&mut state.generations.create, generation, "create") {
                return DispatchResult::unchanged();
            }
            state.message = failure.into_message(CREATE_RESPONSE_FAILED);
            DispatchResult::changed()
        }

        // ===== Message =====
        Action::MessageClear => {
            if state.message.is_empty() {
                return DispatchResult::unchanged();
            }
            state.message = Message::default();
            DispatchResult::changed()
        }

        // Handled by the runtime
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fetch_responses(state: &mut AppState) -> DispatchResult<Effect> {
    state.message = Message::default();
    let generation = state.generations.responses.next();
    DispatchResult::changed_with(Effect::FetchResponses { generation })
}

fn settle(slot: &mut Generation, generation: u64, request: &str) -> bool {
    let current = slot.current();
    let settled = slot.settle(generation);
    if !settled {
        debug!(request, generation, current, "Dropping stale result");
    }
    settled
}

/// Merge a success payload into the snapshot
///
/// A payload that does not fit the snapshot is reported like a malformed
/// response. Returns whether the merge happened.
fn merge_payload(state: &mut AppState, payload: Map<String, Value>, fallback: &str) -> bool {
    let raw = Value::Object(payload.clone()).to_string();
    match state.snapshot.merge(payload) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, body = %raw, "Payload does not fit the snapshot");
            let failure = Failure {
                status: None,
                detail: Some(format!("Malformed response, {raw}")),
            };
            state.message = failure.into_message(fallback);
            false
        }
    }
}

fn cycle_login_focus(state: &mut AppState, delta: isize) -> DispatchResult<Effect> {
    let len = state.login.fields.len() as isize;
    if len < 2 {
        return DispatchResult::unchanged();
    }
    let focused = state.login.focused as isize;
    state.login.focused = (focused + delta).rem_euclid(len) as usize;
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MessageContext;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn start_fetch(state: &mut AppState) -> u64 {
        let result = reducer(state, Action::ResponsesFetch);
        match result.effects.as_slice() {
            [Effect::FetchResponses { generation }] => *generation,
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_fetch_clears_message_and_requests_list() {
        let mut state = AppState::default();
        state.message = Message::danger("old");

        let generation = start_fetch(&mut state);

        assert_eq!(generation, 1);
        assert!(state.message.is_empty());
        assert!(state.is_loading());
    }

    #[test]
    fn test_success_merges_payload() {
        let mut state = AppState::default();
        let generation = start_fetch(&mut state);

        let result = reducer(
            &mut state,
            Action::ResponsesDidLoad {
                generation,
                payload: object(json!({"items": []})),
            },
        );

        assert!(result.changed);
        assert!(state.message.is_empty());
        assert_eq!(state.snapshot.get("items"), Some(&json!([])));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_known_status_maps_to_text() {
        let mut state = AppState::default();
        let generation = start_fetch(&mut state);

        reducer(
            &mut state,
            Action::ResponsesDidFail {
                generation,
                failure: Failure {
                    status: Some(404),
                    detail: None,
                },
            },
        );

        assert_eq!(state.message.context, Some(MessageContext::Danger));
        assert_eq!(state.message.text, "Not found.");
    }

    #[test]
    fn test_unknown_failure_uses_fallback() {
        let mut state = AppState::default();
        let generation = start_fetch(&mut state);

        reducer(
            &mut state,
            Action::ResponsesDidFail {
                generation,
                failure: Failure {
                    status: None,
                    detail: Some("Malformed response, <html>".into()),
                },
            },
        );

        assert_eq!(state.message.text, FETCH_RESPONSES_FAILED);
        assert_eq!(
            state.message.detail.as_deref(),
            Some("Malformed response, <html>")
        );
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut state = AppState::default();
        let first = start_fetch(&mut state);
        let second = start_fetch(&mut state);

        let result = reducer(
            &mut state,
            Action::ResponsesDidLoad {
                generation: first,
                payload: object(json!({"items": [1]})),
            },
        );
        assert!(!result.changed);
        assert!(state.snapshot.get("items").is_none());

        reducer(
            &mut state,
            Action::ResponsesDidLoad {
                generation: second,
                payload: object(json!({"items": [2]})),
            },
        );
        assert_eq!(state.snapshot.get("items"), Some(&json!([2])));
    }

    #[test]
    fn test_mistyped_payload_is_malformed() {
        let mut state = AppState::default();
        let generation = start_fetch(&mut state);

        reducer(
            &mut state,
            Action::ResponsesDidLoad {
                generation,
                payload: object(json!({"hasSession": "maybe"})),
            },
        );

        assert_eq!(state.message.text, FETCH_RESPONSES_FAILED);
        assert!(state
            .message
            .detail
            .as_deref()
            .is_some_and(|d| d.starts_with("Malformed response, ")));
        assert!(!state.snapshot.has_session);
    }

    #[test]
    fn test_session_without_login_or_session_warns() {
        let mut state = AppState::new(Page::Login);
        let result = reducer(&mut state, Action::SessionCheck);
        assert_eq!(
            result.effects,
            vec![Effect::CheckSession { generation: 1 }]
        );

        reducer(
            &mut state,
            Action::SessionDidLoad {
                generation: 1,
                payload: object(json!({"hasSession": false, "displayLogin": false})),
            },
        );

        assert_eq!(state.message, Message::warning(SESSION_EXPIRED));
    }

    #[test]
    fn test_session_with_login_form_does_not_warn() {
        let mut state = AppState::new(Page::Login);
        reducer(&mut state, Action::SessionCheck);

        reducer(
            &mut state,
            Action::SessionDidLoad {
                generation: 1,
                payload: object(json!({
                    "hasSession": false,
                    "displayLogin": true,
                    "signOutUrls": ["https://sso/logout"]
                })),
            },
        );

        assert!(state.message.is_empty());
        assert!(state.snapshot.display_login);
        assert_eq!(state.snapshot.sign_out_urls, vec!["https://sso/logout"]);
    }

    #[test]
    fn test_session_failure_fallback() {
        let mut state = AppState::new(Page::Login);
        reducer(&mut state, Action::SessionCheck);

        reducer(
            &mut state,
            Action::SessionDidFail {
                generation: 1,
                failure: Failure {
                    status: Some(503),
                    detail: None,
                },
            },
        );

        assert!(state.message.text.starts_with("Tower"));
    }

    #[test]
    fn test_user_detail_update_touches_one_key() {
        let mut state = AppState::new(Page::Login);
        state
            .snapshot
            .user_details
            .insert("password".into(), "x".into());

        let result = reducer(
            &mut state,
            Action::UserDetailUpdate {
                name: "username".into(),
                value: "alice".into(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.user_detail("username"), "alice");
        assert_eq!(state.user_detail("password"), "x");

        let result = reducer(
            &mut state,
            Action::UserDetailUpdate {
                name: "username".into(),
                value: "alice".into(),
            },
        );
        assert!(!result.changed);
    }

    #[test]
    fn test_login_posts_user_details_and_follows_redirect() {
        let mut state = AppState::new(Page::Login);
        state
            .snapshot
            .user_details
            .insert("username".into(), "alice".into());

        let result = reducer(&mut state, Action::LoginSubmit);
        let [Effect::Login {
            generation,
            user_details,
        }] = result.effects.as_slice()
        else {
            panic!("expected a login effect");
        };
        assert_eq!(user_details["username"], "alice");

        let result = reducer(
            &mut state,
            Action::LoginDidRedirect {
                generation: *generation,
                redirect_uri: "/home".into(),
            },
        );

        assert_eq!(state.location, "/home");
        assert_eq!(state.page, Page::Home);
        assert_eq!(
            result.effects,
            vec![Effect::FetchResponses { generation: 1 }]
        );
    }

    #[test]
    fn test_login_failure_fallback() {
        let mut state = AppState::new(Page::Login);
        reducer(&mut state, Action::LoginSubmit);

        reducer(
            &mut state,
            Action::LoginDidFail {
                generation: 1,
                failure: Failure::default(),
            },
        );

        assert_eq!(state.message, Message::danger(LOGIN_FAILED));
        assert_eq!(state.page, Page::Login);
    }

    #[test]
    fn test_login_focus_wraps() {
        let mut state = AppState::new(Page::Login);
        assert_eq!(state.login.focused, 0);

        reducer(&mut state, Action::LoginFocusPrev);
        assert_eq!(state.login.focused, 1);

        reducer(&mut state, Action::LoginFocusNext);
        assert_eq!(state.login.focused, 0);
    }

    #[test]
    fn test_show_dialog_clears_message() {
        let mut state = AppState::default();
        state.message = Message::danger("Not found.");

        let result = reducer(&mut state, Action::DialogShow);

        assert!(result.changed);
        assert!(state.dialog.visible);
        assert!(state.message.is_empty());
        assert_eq!(result.effects, vec![Effect::CancelDialogHide]);
    }

    #[test]
    fn test_dismiss_schedules_hide() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DialogShow);

        let result = reducer(&mut state, Action::DialogDismiss);
        assert!(!result.changed);
        assert_eq!(result.effects, vec![Effect::HideDialogLater]);
        assert!(state.dialog.visible);

        reducer(&mut state, Action::DialogHide);
        assert!(!state.dialog.visible);

        let result = reducer(&mut state, Action::DialogDismiss);
        assert!(!result.has_effects());
    }

    #[test]
    fn test_submit_rejects_invalid_json() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DialogShow);
        reducer(&mut state, Action::DialogDraftUpdate("{not json".into()));

        let result = reducer(&mut state, Action::DialogSubmit);

        assert!(!result.has_effects());
        assert_eq!(state.dialog.error.as_deref(), Some(INVALID_JSON));

        reducer(&mut state, Action::DialogDraftUpdate("{}".into()));
        assert!(state.dialog.error.is_none());
    }

    #[test]
    fn test_submit_forwards_document() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DialogShow);
        reducer(
            &mut state,
            Action::DialogDraftUpdate(r#"{"path": "/users", "status": 200}"#.into()),
        );

        let result = reducer(&mut state, Action::DialogSubmit);

        assert_eq!(
            result.effects,
            vec![Effect::CreateResponse {
                generation: 1,
                document: json!({"path": "/users", "status": 200}),
            }]
        );
    }

    #[test]
    fn test_created_response_hides_dialog() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DialogShow);
        reducer(&mut state, Action::DialogDraftUpdate("{}".into()));
        reducer(&mut state, Action::DialogSubmit);

        reducer(
            &mut state,
            Action::DialogDidCreate {
                generation: 1,
                payload: object(json!({"items": [{"path": "/users"}]})),
            },
        );

        assert!(!state.dialog.visible);
        assert!(state.dialog.draft.is_empty());
        assert_eq!(state.message, Message::success(RESPONSE_CREATED));
        assert_eq!(
            state.snapshot.get("items"),
            Some(&json!([{"path": "/users"}]))
        );
    }

    #[test]
    fn test_create_failure_keeps_dialog_open() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DialogShow);
        reducer(&mut state, Action::DialogDraftUpdate("{}".into()));
        reducer(&mut state, Action::DialogSubmit);

        reducer(
            &mut state,
            Action::DialogDidFail {
                generation: 1,
                failure: Failure {
                    status: Some(401),
                    detail: None,
                },
            },
        );

        assert!(state.dialog.visible);
        assert!(state.message.text.starts_with("Forbidden"));
    }

    #[test]
    fn test_message_clear() {
        let mut state = AppState::default();
        state.message = Message::danger("Not found.");

        assert!(reducer(&mut state, Action::MessageClear).changed);
        assert_eq!(state.message.text, "");
        assert!(!reducer(&mut state, Action::MessageClear).changed);
    }
}
