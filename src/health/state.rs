//! Health report bodies.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::health::process::MemoryStats;
use crate::upstream::Service;

/// Name this gateway reports itself under.
pub const SERVICE_NAME: &str = "frontend";

/// Current time as an RFC 3339 UTC timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessReport {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
    pub memory: MemoryStats,
}

impl LivenessReport {
    pub fn up(environment: impl Into<String>, uptime: f64, memory: MemoryStats) -> Self {
        Self {
            status: "UP",
            service: SERVICE_NAME,
            timestamp: timestamp_now(),
            uptime,
            environment: environment.into(),
            memory,
        }
    }
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub service: &'static str,
    pub timestamp: String,
}

impl ReadinessReport {
    pub fn ready() -> Self {
        Self {
            ready: true,
            service: SERVICE_NAME,
            timestamp: timestamp_now(),
        }
    }
}

/// Body of a successful `GET /api/health/{service}`: the upstream's own
/// health payload wrapped with the service name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamHealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub details: Value,
}

impl UpstreamHealthReport {
    pub fn healthy(service: Service, details: Value) -> Self {
        Self {
            status: "healthy",
            service: service.api_name(),
            details,
        }
    }
}
