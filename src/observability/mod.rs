//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty for humans, JSON for log shippers)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID and delivery ID are attached to every delivery log line
//! - Payload contents are never logged for unauthenticated requests
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
