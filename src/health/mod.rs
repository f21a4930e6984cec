//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness (GET /health):
//!     process.rs (uptime, memory) → state.rs LivenessReport
//!
//! Readiness (GET /ready):
//!     static ReadinessReport, no dependency checks
//!
//! Upstream health (GET /api/health/{products,orders}):
//!     upstream client probe of /health (short deadline)
//!     → UpstreamHealthReport, or 503 "unhealthy" envelope
//! ```
//!
//! # Design Decisions
//! - Liveness and readiness never touch upstreams
//! - No health state is kept between requests; every probe is live

pub mod process;
pub mod state;

pub use state::{LivenessReport, ReadinessReport, UpstreamHealthReport, SERVICE_NAME};
