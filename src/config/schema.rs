//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment name under which fault details are disclosed to clients.
pub const DEVELOPMENT: &str = "development";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host, port, body limit).
    pub listener: ListenerConfig,

    /// Upstream service base URLs.
    pub upstreams: UpstreamsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static web UI settings.
    pub ui: UiConfig,
}

impl GatewayConfig {
    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }

    /// Whether the gateway runs in the development environment.
    pub fn is_development(&self) -> bool {
        self.observability.environment == DEVELOPMENT
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (IP address).
    pub host: String,

    /// Bind port. `0` picks an ephemeral port.
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 100 * 1024,
        }
    }
}

/// Base URLs of the two upstream services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    /// Product service base URL (e.g., "http://product-api:5000").
    pub product_url: String,

    /// Order service base URL (e.g., "http://order-api:8000").
    pub order_url: String,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            product_url: "http://product-api:5000".to_string(),
            order_url: "http://order-api:8000".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls and shutdown.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for product/order data operations in milliseconds.
    pub data_ms: u64,

    /// Deadline for upstream health probes in milliseconds.
    /// Kept short so the dashboard stays responsive.
    pub health_ms: u64,

    /// Time allowed for in-flight requests after a termination signal.
    pub shutdown_grace_secs: u64,
}

impl TimeoutConfig {
    pub fn data(&self) -> Duration {
        Duration::from_millis(self.data_ms)
    }

    pub fn health(&self) -> Duration {
        Duration::from_millis(self.health_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            data_ms: 5000,
            health_ms: 3000,
            shutdown_grace_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Deployment environment name ("development", "production", ...).
    pub environment: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: DEVELOPMENT.to_string(),
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Static web UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Directory holding `index.html` and its assets.
    pub static_dir: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            static_dir: "public".to_string(),
        }
    }
}
