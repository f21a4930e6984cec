//! Outbound HTTP client for the upstream services.
//!
//! # Responsibilities
//! - Issue exactly one request per call (no retries)
//! - Bound the whole exchange (connect, head, body) by a deadline
//! - Decode the JSON body and classify failures
//! - Propagate the inbound request ID upstream

use axum::body::Body;
use axum::http::{header, Method, Request};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::resilience::{with_deadline, DeadlineExceeded};
use crate::upstream::outcome::{decode_body, error_chain, Outcome, UpstreamError, UpstreamResponse};
use crate::upstream::target::UpstreamTarget;

/// Largest upstream body the gateway will buffer.
const MAX_UPSTREAM_BODY: usize = 10 * 1024 * 1024;

/// One outbound request, relative to an [`UpstreamTarget`].
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub request_id: Option<String>,
}

impl UpstreamRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            request_id: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Pooled client shared by all handlers. Cloning is cheap.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Perform `request` against `target`, failing after `deadline`.
    pub async fn call(&self, target: &UpstreamTarget, request: UpstreamRequest, deadline: Duration) -> Outcome {
        let start = Instant::now();
        let method = request.method.clone();

        let outcome = self.exchange(target, request, deadline).await;

        let label = match &outcome {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_upstream_call(target.service().label(), method.as_str(), label, start);

        match &outcome {
            Ok(response) => tracing::debug!(
                upstream = %target.service(),
                method = %method,
                status = response.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call succeeded"
            ),
            Err(e) => tracing::debug!(
                upstream = %target.service(),
                method = %method,
                kind = e.kind(),
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call failed"
            ),
        }

        outcome
    }

    async fn exchange(&self, target: &UpstreamTarget, request: UpstreamRequest, deadline: Duration) -> Outcome {
        let uri = target.url(&request.path);

        let mut builder = Request::builder()
            .method(request.method)
            .uri(uri.as_str())
            .header(header::ACCEPT, "application/json");

        if let Some(id) = request.request_id.as_deref() {
            builder = builder.header(X_REQUEST_ID, id);
        }

        let body = match request.body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let req = builder
            .body(body)
            .map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;

        let exchange = async {
            let response = self.client.request(req).await.map_err(|e| {
                if e.is_connect() {
                    UpstreamError::Connect(error_chain(&e))
                } else {
                    UpstreamError::Transport(error_chain(&e))
                }
            })?;

            let status = response.status();
            let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_UPSTREAM_BODY)
                .await
                .map_err(|e| UpstreamError::Body(e.to_string()))?;

            Ok::<_, UpstreamError>((status, bytes))
        };

        let (status, bytes) = with_deadline(deadline, exchange)
            .await
            .map_err(|DeadlineExceeded(after)| UpstreamError::Timeout(after))??;

        let body = decode_body(&bytes);
        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }

        Ok(UpstreamResponse { status, body })
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
