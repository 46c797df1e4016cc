//! Request deadline enforcement.
//!
//! # Responsibilities
//! - Bound every request (body read + handler) by a wall-clock ceiling
//! - Answer 504 Gateway Timeout when the ceiling is hit
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Only the wait is cancelled; work the handler detached keeps running
//! - Timed-out requests return 504 with a plain "Timeout" body

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::webhook::DeliveryOutcome;

/// Wall-clock ceiling applied to each request.
#[derive(Debug, Clone, Copy)]
pub struct RequestDeadline {
    pub limit: Duration,
}

impl RequestDeadline {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

/// Middleware racing the inner service against the deadline.
pub async fn deadline_middleware(
    State(deadline): State<RequestDeadline>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(deadline.limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                limit_ms = deadline.limit.as_millis() as u64,
                "Request deadline exceeded"
            );
            metrics::record_delivery(DeliveryOutcome::TimedOut.label(), start);
            DeliveryOutcome::TimedOut.into_response()
        }
    }
}
