//! Frontend gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                 FRONTEND GATEWAY                 │
//!                      │                                                  │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ───────────────────┼─▶│  http   │───▶│ routing  │───▶│  upstream  │───┼──▶ product-api
//!                      │  │ server  │    │operations│    │   client   │───┼──▶ order-api
//!                      │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                      │                                       │          │
//!   Client Response    │  ┌──────────┐                         │          │
//!   ◀──────────────────┼──│ response │◀────────────────────────┘          │
//!                      │  │ envelopes│   200/201 passthrough or 503       │
//!                      │  └──────────┘                                    │
//!                      │                                                  │
//!                      │  config · health · observability · resilience    │
//!                      │  lifecycle (signals, graceful drain)             │
//!                      └──────────────────────────────────────────────────┘
//! ```

use frontend_gateway::config::load_from_env;
use frontend_gateway::health::SERVICE_NAME;
use frontend_gateway::lifecycle::startup;
use frontend_gateway::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    init_logging(SERVICE_NAME, &config.observability)?;

    tracing::info!(
        bind_address = %config.bind_address(),
        product_api_url = %config.upstreams.product_url,
        order_api_url = %config.upstreams.order_url,
        data_timeout_ms = config.timeouts.data_ms,
        health_timeout_ms = config.timeouts.health_ms,
        "Configuration loaded"
    );

    let outcome = startup::run(config).await?;

    tracing::info!(?outcome, "Shutdown complete");
    std::process::exit(outcome.exit_code());
}
