//! Result of a single upstream call.

use axum::http::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// A 2xx upstream reply, body decoded but otherwise untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamResponse {
    /// Element count when the body is an array.
    pub fn item_count(&self) -> Option<usize> {
        self.body.as_array().map(Vec::len)
    }

    /// The `id` field of an object body, rendered for logging.
    pub fn id(&self) -> Option<String> {
        match self.body.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Why an upstream call failed.
///
/// Clients only ever see the message text; the variant is kept for logs and
/// metrics.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
    #[error("{0}")]
    Connect(String),
    #[error("{0}")]
    Transport(String),
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: Value },
    #[error("failed to read upstream response body: {0}")]
    Body(String),
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),
}

impl UpstreamError {
    /// Short classification label.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Connect(_) => "connect",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Body(_) => "body",
            UpstreamError::InvalidRequest(_) => "request",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}

/// Outcome of one upstream call.
pub type Outcome = Result<UpstreamResponse, UpstreamError>;

/// Decode an upstream body. Empty bodies become `null`; bodies that are not
/// JSON are passed through as a string of their text.
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Render an error together with its whole `source()` chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
