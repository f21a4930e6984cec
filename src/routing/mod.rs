//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → axum route table (http/server.rs)
//!     → handler names its Operation (operations.rs)
//!     → Operation yields service, method, upstream path, deadline class,
//!       success status
//!     → upstream client
//! ```
//!
//! # Design Decisions
//! - The route-to-upstream mapping lives in one table, not in each handler
//! - Path identifiers are opaque; no coercion or existence checks

pub mod operations;

pub use operations::Operation;
