//! Terminal states of a delivery and their HTTP rendering.
//!
//! ```text
//! RECEIVED -> VERIFYING -> {UNAUTHORIZED, FILTERING}
//! FILTERING -> {IGNORED, DISPATCHING}
//! DISPATCHING -> {SUCCEEDED, FAILED}
//! any state -> TIMED_OUT (request deadline)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// How a delivery ended. Every variant is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Unauthorized,
    Ignored,
    Succeeded,
    Failed,
    TimedOut,
}

impl DeliveryOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Ignored | Self::Succeeded => StatusCode::OK,
            Self::Failed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Short plain-text body returned to the sender.
    pub fn body(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Invalid signature",
            Self::Ignored => "Ignored",
            Self::Succeeded => "OK",
            Self::Failed => "Pull failed",
            Self::TimedOut => "Timeout",
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Ignored => "ignored",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

impl IntoResponse for DeliveryOutcome {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}
