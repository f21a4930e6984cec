//! Liveness, readiness and upstream health handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::health::process::{memory_stats, uptime_secs};
use crate::health::{LivenessReport, ReadinessReport, UpstreamHealthReport};
use crate::http::api::call_upstream;
use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::Operation;

/// `GET /health`. Always 200; never calls an upstream.
pub async fn liveness(State(state): State<AppState>) -> Json<LivenessReport> {
    let report = LivenessReport::up(
        state.config.observability.environment.clone(),
        uptime_secs(state.started),
        memory_stats(),
    );
    tracing::info!(status = "UP", "Health check performed");
    Json(report)
}

/// `GET /ready`. Always 200 with `ready: true`; upstreams are not probed.
pub async fn readiness() -> Json<ReadinessReport> {
    Json(ReadinessReport::ready())
}

pub async fn product_health(State(state): State<AppState>, RequestId(request_id): RequestId) -> Response {
    probe(&state, Operation::ProductHealth, request_id).await
}

pub async fn order_health(State(state): State<AppState>, RequestId(request_id): RequestId) -> Response {
    probe(&state, Operation::OrderHealth, request_id).await
}

async fn probe(state: &AppState, op: Operation, request_id: Option<String>) -> Response {
    let service = op.service();
    tracing::debug!(operation = op.name(), "{}", op.intent_message());

    match call_upstream(state, op, None, None, request_id).await {
        Ok(response) => {
            tracing::debug!(operation = op.name(), "{}", op.success_message());
            Json(UpstreamHealthReport::healthy(service, response.body)).into_response()
        }
        Err(e) => {
            tracing::warn!(
                operation = op.name(),
                url = state.upstreams.get(service).base_url(),
                kind = e.kind(),
                error = %e,
                "{}",
                op.failure_message()
            );
            ApiError::Unhealthy {
                service,
                message: e.to_string(),
            }
            .into_response()
        }
    }
}
