use async_trait::async_trait;
use gloo::net::http::Request;
use thiserror::Error;
use web_sys::FormData;

use super::logging::Logger;

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// No response was obtained
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Build(String),

    #[error("request failed: {0}")]
    Send(String),
}

/// Posts a form body to a same-origin route
#[async_trait(?Send)]
pub trait FormTransport {
    type Form;

    async fn post_form(&self, endpoint: &str, form: &Self::Form) -> Result<HttpReply, TransportError>;
}

/// `fetch` through gloo-net. Same-origin requests carry and accept cookies,
/// which is how the session cookie set by the auth routes lands.
#[derive(Debug, Clone, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl FormTransport for GlooTransport {
    type Form = FormData;

    async fn post_form(&self, endpoint: &str, form: &FormData) -> Result<HttpReply, TransportError> {
        let response = Request::post(endpoint)
            .body(form.clone())
            .map_err(|e| TransportError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status();
        // An unreadable body is left empty; the status still decides success
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                Logger::warn_with_component("api", &format!("could not read {} response body: {}", endpoint, e));
                String::new()
            }
        };

        Ok(HttpReply { status, body })
    }
}
