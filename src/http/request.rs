//! Request identification.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) unless the client supplied one
//! - Echo the ID on the response
//! - Expose the ID to handlers so it can be forwarded upstream
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a UUID to every request lacking an `x-request-id` header.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Extractor for the current request ID, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestId(pub Option<String>);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(RequestId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_header() {
        let (mut parts, _) = Request::builder()
            .header(X_REQUEST_ID, "req-123")
            .body(())
            .unwrap()
            .into_parts();
        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id, RequestId(Some("req-123".into())));
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id, RequestId(None));
    }
}
