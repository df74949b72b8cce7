use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while locating and wiring the page's markup
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no browser document available")]
    NoDocument,

    #[error("element #{id} not found")]
    MissingElement { id: String },

    #[error("element #{id} is not a {expected}")]
    UnexpectedElement { id: String, expected: &'static str },

    #[error("invalid page configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(js_error_message(&value))
    }
}

/// Best-effort text for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
