//! External update procedure.
//!
//! # Data Flow
//! ```text
//! accepted push delivery
//!     → ScriptUpdater::run (awaits a detached task)
//!         → optional mutex (at most one update at a time)
//!         → tokio::process::Command (no args, inherited env)
//!         → exit status + captured stdout/stderr
//!         → log + metrics (always, even if nobody is waiting)
//!     → UpdateReport / UpdateError back to the handler
//! ```
//!
//! # Design Decisions
//! - The script is opaque: it owns pulling content and its own idempotence
//! - A request timeout stops the waiting, never the process
//! - Failures are terminal for the delivery; there are no retries

pub mod script;

pub use script::{ScriptUpdater, UpdateError, UpdateReport};
