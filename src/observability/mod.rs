//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured JSON log events)
//!     → metrics.rs (upstream call counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows from the client through to the upstreams
//! - Metrics are cheap (no-ops until a recorder is installed)

pub mod logging;
pub mod metrics;
