use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when the server rejects a submission without a usable `detail`
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Shown when no usable response was obtained at all
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// The two authentication dialogs rendered for anonymous visitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Signup,
    Login,
}

impl ModalKind {
    pub const ALL: [ModalKind; 2] = [ModalKind::Signup, ModalKind::Login];

    /// The dialog reached through this dialog's switch link
    pub fn other(self) -> Self {
        match self {
            ModalKind::Signup => ModalKind::Login,
            ModalKind::Login => ModalKind::Signup,
        }
    }

    /// Route the form posts to unless configuration overrides it
    pub fn default_endpoint(self) -> &'static str {
        match self {
            ModalKind::Signup => "/signup",
            ModalKind::Login => "/login",
        }
    }

    /// Every form field the backend route reads
    pub fn form_fields(self) -> &'static [&'static str] {
        match self {
            ModalKind::Signup => &["username", "email", "password", "first_name", "last_name"],
            ModalKind::Login => &["username", "password"],
        }
    }

    /// Fields the backend route rejects the request without
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ModalKind::Signup => &["username", "email", "password"],
            ModalKind::Login => &["username", "password"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModalKind::Signup => "signup",
            ModalKind::Login => "login",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing texts for failed submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMessages {
    pub generic_error: String,
    pub network_error: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            generic_error: GENERIC_ERROR_MESSAGE.to_string(),
            network_error: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// JSON body the auth routes return on a non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// Shapes the `detail` field takes in practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// `{"detail": "Invalid username or password"}`
    Message(String),
    /// Request validation failures: `{"detail": [{"msg": "...", ...}]}`
    Issues(Vec<ValidationIssue>),
    /// Anything else; rendered as the generic message
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any
    pub fn message(&self) -> Option<String> {
        let text = match self.detail.as_ref()? {
            ErrorDetail::Message(message) => message.as_str(),
            ErrorDetail::Issues(issues) => issues.first()?.msg.as_str(),
            ErrorDetail::Other(_) => return None,
        };
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Result of one form submission, as the UI acts on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx: the server set the session cookie, the page must reload
    Success,
    /// Non-2xx with a JSON body; carries the `detail` message when present
    ServerRejected(Option<String>),
    /// No response, or a response whose body could not be understood
    NetworkFailure,
}

impl SubmissionOutcome {
    /// Classify a completed HTTP exchange.
    ///
    /// A 2xx status is a success whatever the body holds. Any other status
    /// needs a JSON object body; a body that fails to parse is folded into
    /// `NetworkFailure` so raw parse errors never reach the user.
    pub fn from_response(status: u16, body: &str) -> Self {
        if (200..300).contains(&status) {
            return SubmissionOutcome::Success;
        }

        let object = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            _ => return SubmissionOutcome::NetworkFailure,
        };
        match serde_json::from_value::<ErrorBody>(object) {
            Ok(error_body) => SubmissionOutcome::ServerRejected(error_body.message()),
            Err(_) => SubmissionOutcome::NetworkFailure,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    /// Text for the modal's error element, `None` on success
    pub fn error_message(&self, messages: &FeedbackMessages) -> Option<String> {
        match self {
            SubmissionOutcome::Success => None,
            SubmissionOutcome::ServerRejected(Some(detail)) => Some(detail.clone()),
            SubmissionOutcome::ServerRejected(None) => Some(messages.generic_error.clone()),
            SubmissionOutcome::NetworkFailure => Some(messages.network_error.clone()),
        }
    }

    pub fn to_result(&self, messages: &FeedbackMessages) -> SubmissionResult {
        SubmissionResult {
            succeeded: self.succeeded(),
            error_message: self.error_message(messages),
        }
    }
}

/// Flattened view of an outcome: whether it succeeded and what to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub succeeded: bool,
    pub error_message: Option<String>,
}
