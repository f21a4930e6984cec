//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce per-call deadline)
//!     → On failure: caller translates to a 503 envelope
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - A failed call fails its request immediately; there are no retries
//!   and no circuit breaker

pub mod timeouts;

pub use timeouts::{with_deadline, CallClass, DeadlineExceeded};
