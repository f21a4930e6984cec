//! Configuration loading from disk and the process environment.

use std::fs;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the runtime configuration: defaults, then the optional file named by
/// `GATEWAY_CONFIG`, then environment overrides.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Same as [`load_from_env`] but reads variables through `lookup`.
pub fn load_with<F>(lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match lookup(CONFIG_PATH_VAR) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    let config = apply_env_overrides(base, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay the recognised environment variables onto `config`.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: &F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: "PORT", value: port.clone() })?;
    }
    if let Some(url) = lookup("PRODUCT_API_URL") {
        config.upstreams.product_url = url;
    }
    if let Some(url) = lookup("ORDER_API_URL") {
        config.upstreams.order_url = url;
    }
    if let Some(env) = lookup("NODE_ENV") {
        config.observability.environment = env;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(addr) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = addr;
    }
    if let Some(dir) = lookup("STATIC_DIR") {
        config.ui.static_dir = dir;
    }
    Ok(config)
}
