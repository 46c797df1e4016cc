//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID for log correlation)
//!     → resilience::timeouts (request deadline)
//!     → webhook::handler (health check / delivery)
//!     → plain-text response
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::WebhookServer;
