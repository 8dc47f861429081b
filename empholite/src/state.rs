//! Application state - single source of truth
//!
//! Components receive `&AppState` pieces as props; only the reducer mutates
//! it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity of a banner message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageContext {
    Success,
    Info,
    Warning,
    Danger,
}

/// Banner message; an empty text means "no banner"
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<MessageContext>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Diagnostic text, e.g. the raw body of a malformed response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Message {
    pub fn new(context: MessageContext, text: impl Into<String>) -> Self {
        Self {
            context: Some(context),
            text: text.into(),
            detail: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageContext::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageContext::Warning, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(MessageContext::Danger, text)
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Server-side state mirrored by the client
///
/// Known keys are typed; anything else the backend sends (for example the
/// `items` of `/ajax/list`) is kept verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub has_session: bool,
    #[serde(default)]
    pub display_login: bool,
    #[serde(default)]
    pub sign_out_urls: Vec<String>,
    #[serde(default)]
    pub user_details: BTreeMap<String, String>,
    #[serde(default)]
    pub profile_in_request: bool,
    #[serde(default)]
    pub profile_in_session: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    /// Shallow-merge `payload` over the current top-level keys
    ///
    /// `success` is never merged. On error the snapshot is left untouched.
    pub fn merge(&mut self, payload: Map<String, Value>) -> Result<(), serde_json::Error> {
        let Value::Object(mut current) = serde_json::to_value(&*self)? else {
            return Ok(());
        };
        for (key, value) in payload {
            if key != "success" {
                current.insert(key, value);
            }
        }
        *self = serde_json::from_value(Value::Object(current))?;
        Ok(())
    }

    /// An extra key, e.g. `items`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Which screen is mounted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    /// Responses list and the create dialog
    #[default]
    Home,
    /// Session probe and login form
    Login,
}

/// A request failure, reduced to what the reducer needs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status, or the `status` of an application error
    pub status: Option<u16>,
    pub detail: Option<String>,
}

/// Known statuses and the text shown for them
const STATUS_MESSAGES: &[(u16, &str)] = &[
    (
        401,
        "Forbidden, your SSO session may have expired. Try refreshing your browser.",
    ),
    (404, "Not found."),
    (
        503,
        "Tower or its dependencies appear to be unavailable at the moment.",
    ),
];

pub fn status_message(status: u16) -> Option<&'static str> {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, text)| *text)
}

impl Failure {
    /// Danger message: the text for a known status, else `fallback`
    pub fn into_message(self, fallback: &str) -> Message {
        let text = self.status.and_then(status_message).unwrap_or(fallback);
        Message::danger(text).with_detail(self.detail)
    }
}

/// Generation counter of one logical request
///
/// Every new request takes the next generation. A result settles the
/// request only if it carries the current generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
    in_flight: bool,
}

impl Generation {
    /// Start a new request and return its generation
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.in_flight = true;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Settle the request; false if `generation` is stale
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.current {
            return false;
        }
        self.in_flight = false;
        true
    }
}

/// Per-request generations; results from older generations are ignored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGenerations {
    pub responses: Generation,
    pub session: Generation,
    pub login: Generation,
    pub create: Generation,
}

impl RequestGenerations {
    pub fn any_in_flight(&self) -> bool {
        [self.responses, self.session, self.login, self.create]
            .iter()
            .any(Generation::in_flight)
    }
}

/// The response-creation dialog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogState {
    pub visible: bool,
    /// JSON document being edited
    pub draft: String,
    /// Validation error for the draft
    pub error: Option<String>,
}

/// Login form layout
#[derive(Clone, Debug, PartialEq)]
pub struct LoginForm {
    /// Field names in display order
    pub fields: Vec<String>,
    pub focused: usize,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            fields: vec!["username".into(), "password".into()],
            focused: 0,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub message: Message,
    pub snapshot: Snapshot,
    pub dialog: DialogState,
    pub login: LoginForm,
    pub page: Page,
    /// Current navigation target
    pub location: String,
    pub generations: RequestGenerations,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Page::Home)
    }
}

impl AppState {
    pub fn new(page: Page) -> Self {
        Self {
            message: Message::default(),
            snapshot: Snapshot::default(),
            dialog: DialogState::default(),
            login: LoginForm::default(),
            page,
            location: "/".into(),
            generations: RequestGenerations::default(),
        }
    }

    pub fn with_login_fields(mut self, fields: Vec<String>) -> Self {
        self.login = LoginForm { fields, focused: 0 };
        self
    }

    pub fn is_loading(&self) -> bool {
        self.generations.any_in_flight()
    }

    /// Value of a user-detail field, empty if unset
    pub fn user_detail(&self, name: &str) -> &str {
        self.snapshot
            .user_details
            .get(name)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
