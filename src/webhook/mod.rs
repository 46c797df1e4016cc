//! Webhook authentication and dispatch.
//!
//! # Data Flow
//! ```text
//! POST {path} (raw body bytes + headers)
//!     → event.rs (pull signature / event / delivery headers)
//!     → signature.rs (HMAC-SHA256 over the exact bytes, constant-time compare)
//!         ✗ → 401 Invalid signature
//!     → event.rs (accepted event type?)
//!         ✗ → 200 Ignored
//!     → updater (run pull script, wait for exit)
//!         exit 0 → 200 OK
//!         else   → 500 Pull failed
//! ```
//!
//! # Design Decisions
//! - The body is never parsed or re-serialized before verification
//! - Failures are handled inside the handler; nothing propagates to the server
//! - No retries, no queue, no record of past deliveries

pub mod event;
pub mod handler;
pub mod outcome;
pub mod signature;

pub use event::{DeliveryHeaders, EventDisposition, EventFilter, PushSummary};
pub use handler::{handle_event, health_check, GatewayState, HEALTH_BODY};
pub use outcome::DeliveryOutcome;
pub use signature::{sign, verify, SignatureVerifier, SIGNATURE_PREFIX};
