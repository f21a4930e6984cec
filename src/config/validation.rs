//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream URLs must be absolute `http` URLs with a host
//! - Validate value ranges (timeouts > 0, bind host is an IP)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("{field}: unsupported scheme '{scheme}' (only http is supported)")]
    UnsupportedScheme { field: &'static str, scheme: String },
    #[error("{field}: must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("listener.host: '{0}' is not an IP address")]
    InvalidHost(String),
    #[error("observability.environment: must not be empty")]
    EmptyEnvironment,
    #[error("observability.metrics_address: '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_upstream_url("upstreams.product_url", &config.upstreams.product_url, &mut errors);
    check_upstream_url("upstreams.order_url", &config.upstreams.order_url, &mut errors);

    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroValue { field: "listener.max_body_bytes" });
    }
    if config.timeouts.data_ms == 0 {
        errors.push(ValidationError::ZeroValue { field: "timeouts.data_ms" });
    }
    if config.timeouts.health_ms == 0 {
        errors.push(ValidationError::ZeroValue { field: "timeouts.health_ms" });
    }
    if config.observability.environment.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvironment);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let url = match Url::parse(value) {
        Ok(url) => url,
        Err(e) => {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.to_string(),
                reason: e.to_string(),
            });
            return;
        }
    };

    // The pooled connector speaks plain HTTP only.
    if url.scheme() != "http" {
        errors.push(ValidationError::UnsupportedScheme {
            field,
            scheme: url.scheme().to_string(),
        });
    }
    if url.host_str().is_none() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: "missing host".to_string(),
        });
    }
}
