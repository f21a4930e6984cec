//! Upstream call subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → target.rs (pick product/order base URL)
//!     → client.rs (single request, deadline from resilience::timeouts)
//!     → outcome.rs (2xx → UpstreamResponse, everything else → UpstreamError)
//!     → back to handler for translation into a client response
//! ```
//!
//! # Design Decisions
//! - One pooled hyper client shared by every request
//! - Payloads stay opaque `serde_json::Value`s
//! - Failure classes collapse to one message for clients but stay distinct
//!   in logs and metrics

pub mod client;
pub mod outcome;
pub mod target;

pub use client::{UpstreamClient, UpstreamRequest};
pub use outcome::{Outcome, UpstreamError, UpstreamResponse};
pub use target::{Service, UpstreamTarget, Upstreams};
