//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route table)
//!     → request.rs (assign/propagate request ID)
//!     → api.rs / health.rs (handler per operation)
//!     → [upstream client call] (upstream/)
//!     → response.rs (error envelopes)
//!     → Send to client
//! ```

pub mod api;
pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, GatewayServer};
