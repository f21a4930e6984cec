//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Emit one JSON object per event:
//!   `{timestamp, level, service, message, ...fields, environment}`
//! - Honour `RUST_LOG`, falling back to the configured log level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Event fields are flattened into the record; span fields are not emitted
//! - `service` and `environment` always come from the gateway, never from
//!   event fields

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

const RESERVED_KEYS: [&str; 5] = ["timestamp", "level", "service", "message", "environment"];

/// Event formatter producing the gateway's JSON log line.
#[derive(Debug, Clone)]
pub struct JsonLineFormat {
    service: &'static str,
    environment: String,
}

impl JsonLineFormat {
    pub fn new(service: &'static str, environment: impl Into<String>) -> Self {
        Self {
            service,
            environment: environment.into(),
        }
    }

    /// Build the JSON record for an event's collected fields.
    fn record(&self, level: &tracing::Level, fields: FieldCollector) -> Value {
        let mut record = Map::new();
        record.insert(
            "timestamp".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("level".into(), Value::String(level.as_str().to_ascii_lowercase()));
        record.insert("service".into(), Value::String(self.service.to_string()));
        record.insert("message".into(), Value::String(fields.message.unwrap_or_default()));
        for (key, value) in fields.fields {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                record.insert(key, value);
            }
        }
        record.insert("environment".into(), Value::String(self.environment.clone()));
        Value::Object(record)
    }
}

impl<S, N> FormatEvent<S, N> for JsonLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let record = self.record(event.metadata().level(), fields);
        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Collects event fields as JSON values, keeping `message` apart.
#[derive(Debug, Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, Value)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        self.push(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::String(format!("{:?}", value)));
    }
}

/// Filter directive: `RUST_LOG` when set, else the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(
    service: &'static str,
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().event_format(JsonLineFormat::new(service, &config.environment)))
        .try_init()
}
