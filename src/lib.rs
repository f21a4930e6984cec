//! Frontend gateway library.
//!
//! Exposes one HTTP API in front of the product and order services,
//! reports their health for the dashboard and serves the static web UI.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
