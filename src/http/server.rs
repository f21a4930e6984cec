//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limit, request ID, panic capture)
//! - Serve the static UI and the 404 fallback
//! - Bind server to listener and drain on shutdown

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::{Method, Uri},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{fault_layer, ApiError};
use crate::http::{api, health};
use crate::upstream::{UpstreamClient, Upstreams};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstreams: Upstreams,
    pub client: UpstreamClient,
    pub started: Instant,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let upstreams = Upstreams::from_config(&config.upstreams);
        Self {
            config: Arc::new(config),
            upstreams,
            client: UpstreamClient::new(),
            started: Instant::now(),
        }
    }

    /// Fault envelope for `detail`, redacted unless in development.
    pub fn fault(&self, detail: impl Into<String>) -> ApiError {
        ApiError::fault(detail, self.config.is_development())
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let static_files = ServeDir::new(Path::new(&config.ui.static_dir))
            .call_fallback_on_method_not_allowed(true)
            .fallback(not_found.into_service());

        Router::new()
            .route("/health", get(health::liveness))
            .route("/ready", get(health::readiness))
            .route("/api/products", get(api::list_products).post(api::create_product))
            .route("/api/products/{id}", get(api::get_product))
            .route("/api/orders", get(api::list_orders).post(api::create_order))
            .route("/api/orders/{id}", get(api::get_order))
            .route("/api/health/products", get(health::product_health))
            .route("/api/health/orders", get(health::order_health))
            .method_not_allowed_fallback(not_found)
            .fallback_service(static_files)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(fault_layer(config.is_development()))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives, then wait for in-flight requests.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            product_api_url = %self.config.upstreams.product_url,
            order_api_url = %self.config.upstreams.order_url,
            "Frontend server started on port {}",
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Graceful shutdown initiated");
            })
            .await?;

        tracing::info!("HTTP server closed");
        Ok(())
    }
}

/// Fallback for unmatched routes and methods.
async fn not_found(method: Method, uri: Uri) -> ApiError {
    tracing::warn!(path = %uri.path(), method = %method, "Route not found");
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}
