//! Product and order API handlers.
//!
//! Every handler follows the same steps: log intent, call the upstream once
//! with the operation's deadline, then either pass the payload through with
//! the operation's success status or answer 503 with the service envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::Operation;
use crate::upstream::{Outcome, Service, UpstreamRequest, UpstreamResponse};

/// Log with the identifier under the service's own field name.
macro_rules! log_with_id {
    ($level:ident, $service:expr, $id:expr, $($rest:tt)+) => {
        match $service {
            Service::Product => tracing::$level!(product_id = %$id, $($rest)+),
            Service::Order => tracing::$level!(order_id = %$id, $($rest)+),
        }
    };
}

/// Body of a create request.
///
/// Only `application/json` bodies are parsed. Any other content type, or an
/// empty body, is forwarded as `{}`. A declared JSON body that cannot be
/// read or parsed is a fault.
#[derive(Debug)]
pub struct CreateBody(pub Value);

impl FromRequest<AppState> for CreateBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(CreateBody(Value::Object(Map::new())));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| state.fault(rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(CreateBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(CreateBody)
            .map_err(|e| state.fault(format!("Failed to parse the request body as JSON: {}", e)))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

pub async fn list_products(State(state): State<AppState>, RequestId(request_id): RequestId) -> Response {
    forward(&state, Operation::ListProducts, None, None, request_id).await
}

pub async fn get_product(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(id): Path<String>,
) -> Response {
    forward(&state, Operation::GetProduct, Some(id), None, request_id).await
}

pub async fn create_product(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    CreateBody(body): CreateBody,
) -> Response {
    forward(&state, Operation::CreateProduct, None, Some(body), request_id).await
}

pub async fn list_orders(State(state): State<AppState>, RequestId(request_id): RequestId) -> Response {
    forward(&state, Operation::ListOrders, None, None, request_id).await
}

pub async fn get_order(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(id): Path<String>,
) -> Response {
    forward(&state, Operation::GetOrder, Some(id), None, request_id).await
}

pub async fn create_order(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    CreateBody(body): CreateBody,
) -> Response {
    forward(&state, Operation::CreateOrder, None, Some(body), request_id).await
}

/// Call the upstream for `op` and translate the outcome.
async fn forward(
    state: &AppState,
    op: Operation,
    id: Option<String>,
    body: Option<Value>,
    request_id: Option<String>,
) -> Response {
    let service = op.service();
    let target = state.upstreams.get(service);

    match (&id, &body) {
        (Some(id), _) => log_with_id!(info, service, id, operation = op.name(), "{}", op.intent_message()),
        (None, Some(body)) => tracing::info!(operation = op.name(), body = %body, "{}", op.intent_message()),
        (None, None) => tracing::info!(operation = op.name(), "{}", op.intent_message()),
    }

    let outcome = call_upstream(state, op, id.as_deref(), body, request_id).await;

    match outcome {
        Ok(response) => {
            log_success(op, id.as_deref(), &response);
            (op.success_status(), Json(response.body)).into_response()
        }
        Err(e) => {
            match id.as_deref() {
                Some(id) => log_with_id!(
                    error,
                    service,
                    id,
                    operation = op.name(),
                    url = target.base_url(),
                    kind = e.kind(),
                    error = %e,
                    "{}",
                    op.failure_message()
                ),
                None => tracing::error!(
                    operation = op.name(),
                    url = target.base_url(),
                    kind = e.kind(),
                    error = %e,
                    "{}",
                    op.failure_message()
                ),
            }
            ApiError::Unavailable {
                service,
                message: e.to_string(),
            }
            .into_response()
        }
    }
}

/// Issue the single upstream call for `op`.
pub(crate) async fn call_upstream(
    state: &AppState,
    op: Operation,
    id: Option<&str>,
    body: Option<Value>,
    request_id: Option<String>,
) -> Outcome {
    let path = op.upstream_path(id);
    let request = match body {
        Some(body) => UpstreamRequest::post(path, body),
        None => UpstreamRequest::get(path),
    }
    .with_request_id(request_id);

    let deadline = op.call_class().deadline(&state.config.timeouts);
    state.client.call(state.upstreams.get(op.service()), request, deadline).await
}

fn log_success(op: Operation, id: Option<&str>, response: &UpstreamResponse) {
    let service = op.service();
    if let Some(count) = response.item_count() {
        tracing::info!(operation = op.name(), count, "{}", op.success_message());
    } else if let Some(id) = id {
        log_with_id!(info, service, id, operation = op.name(), "{}", op.success_message());
    } else {
        let created = response.id().unwrap_or_default();
        log_with_id!(info, service, created, operation = op.name(), "{}", op.success_message());
    }
}
