//! Client-facing error envelopes.
//!
//! # Responsibilities
//! - Map upstream failures to 503 envelopes
//! - Render the 404 envelope for unmatched routes
//! - Render the 500 envelope for handler faults, redacting the detail
//!   outside development
//!
//! # Design Decisions
//! - Every error path produces JSON; no plain-text bodies
//! - The redaction decision is made where the fault is observed, so the
//!   envelope itself never carries the raw detail unless allowed

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::observability::metrics;
use crate::upstream::Service;

/// Message returned for faults when the detail may not be disclosed.
pub const REDACTED_FAULT_MESSAGE: &str = "An error occurred";

const NOT_FOUND_MESSAGE: &str = "The requested resource was not found";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// A data call to an upstream failed.
    #[error("{service} unavailable: {message}")]
    Unavailable { service: Service, message: String },

    /// An upstream health probe failed.
    #[error("{service} unhealthy: {message}")]
    Unhealthy { service: Service, message: String },

    /// No route matched.
    #[error("no route for {path}")]
    NotFound { path: String },

    /// A handler faulted. `message` is already redacted when required.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Build the fault envelope for `detail`, logging the full detail.
    pub fn fault(detail: impl Into<String>, disclose: bool) -> Self {
        let detail = detail.into();
        tracing::error!(error = %detail, "Unhandled error");
        let message = if disclose {
            detail
        } else {
            REDACTED_FAULT_MESSAGE.to_string()
        };
        ApiError::Internal { message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable { .. } | ApiError::Unhealthy { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Unavailable { service, message } => json!({
                "error": service.unavailable_message(),
                "message": message,
            }),
            ApiError::Unhealthy { service, message } => json!({
                "status": "unhealthy",
                "service": service.api_name(),
                "error": message,
            }),
            ApiError::NotFound { path } => {
                metrics::record_local_response("not_found", status.as_u16());
                json!({
                    "error": "Not Found",
                    "path": path,
                    "message": NOT_FOUND_MESSAGE,
                })
            }
            ApiError::Internal { message } => {
                metrics::record_local_response("fault", status.as_u16());
                json!({
                    "error": "Internal Server Error",
                    "message": message,
                })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the fault envelope.
#[derive(Debug, Clone, Copy)]
pub struct PanicFault {
    disclose: bool,
}

impl ResponseForPanic for PanicFault {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        ApiError::fault(panic_message(err.as_ref()), self.disclose).into_response()
    }
}

/// Layer catching handler panics. The panic text is only exposed when
/// `disclose` is set.
pub fn fault_layer(disclose: bool) -> CatchPanicLayer<PanicFault> {
    CatchPanicLayer::custom(PanicFault { disclose })
}

/// Text carried by a panic payload, when it has one.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
