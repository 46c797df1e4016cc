//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → timeouts.rs (race the handler against the request deadline)
//!         ✓ → handler response
//!         ✗ → 504 Timeout
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every request has a deadline
//! - No retries: a failed update is terminal for its delivery

pub mod timeouts;

pub use timeouts::{deadline_middleware, RequestDeadline};
