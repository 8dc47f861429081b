//! Actions - every intent and every request result
//!
//! Intents are named `{Category}{Verb}`; results of async work are named
//! `{Category}Did{Outcome}` and carry the generation of the request that
//! produced them, so the reducer can drop stale results.

use serde_json::{Map, Value};

use crate::state::Failure;

/// Application actions with inferred categories
///
/// # Categories
/// - `responses`: ResponsesFetch, ResponsesDidLoad, ResponsesDidFail
/// - `session`: SessionCheck, SessionDidLoad, SessionDidFail
/// - `login`: LoginSubmit, LoginDidRedirect, LoginDidFail, LoginFocusNext,
///   LoginFocusPrev, UserDetailUpdate
/// - `dialog`: DialogShow, DialogDismiss, DialogHide, DialogDraftUpdate,
///   DialogSubmit, DialogDidCreate, DialogDidFail
/// - `message`: MessageClear
/// - uncategorized: Quit
#[derive(empholite_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Responses =====
    /// Load the responses list (GET /ajax/list)
    ResponsesFetch,
    ResponsesDidLoad {
        generation: u64,
        payload: Map<String, Value>,
    },
    ResponsesDidFail {
        generation: u64,
        failure: Failure,
    },

    // ===== Session =====
    /// Probe the SSO session (GET /ajax/check)
    SessionCheck,
    SessionDidLoad {
        generation: u64,
        payload: Map<String, Value>,
    },
    SessionDidFail {
        generation: u64,
        failure: Failure,
    },

    // ===== Login =====
    /// Post the user details (POST /ajax/login)
    LoginSubmit,
    /// The backend accepted the login and named the page to go to
    LoginDidRedirect {
        generation: u64,
        redirect_uri: String,
    },
    LoginDidFail {
        generation: u64,
        failure: Failure,
    },
    LoginFocusNext,
    LoginFocusPrev,
    /// Set one user-detail field
    #[action(category = "login")]
    UserDetailUpdate { name: String, value: String },

    // ===== Dialog =====
    DialogShow,
    /// Hide the dialog after a short delay
    DialogDismiss,
    DialogHide,
    #[action(category = "dialog")]
    DialogDraftUpdate(String),
    /// Validate the draft and post it (POST /ajax/create)
    DialogSubmit,
    DialogDidCreate {
        generation: u64,
        payload: Map<String, Value>,
    },
    DialogDidFail {
        generation: u64,
        failure: Failure,
    },

    // ===== Message =====
    MessageClear,

    // ===== Global =====
    Quit,
}
