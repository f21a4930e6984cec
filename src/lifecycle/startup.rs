//! Startup orchestration.
//!
//! # Responsibilities
//! - Start background tasks (metrics exporter, signal listener)
//! - Bind the listener and begin accepting traffic
//! - Hand the server to the drain logic and report how it stopped
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::GatewayServer;
use crate::lifecycle::shutdown::{drain_with_deadline, DrainOutcome, Shutdown};
use crate::lifecycle::signals::wait_for_termination;
use crate::observability::metrics;

/// Run the gateway until a termination signal has been handled.
pub async fn run(config: GatewayConfig) -> Result<DrainOutcome, std::io::Error> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    let grace = config.timeouts.shutdown_grace();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config);
    let serving = server.run(listener, shutdown.subscribe());
    let drain_rx = shutdown.subscribe();

    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(signal) => tracing::info!(signal, "Termination signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers, shutting down"),
        }
        shutdown.trigger();
    });

    drain_with_deadline(serving, drain_rx, grace).await
}
