//! Liveness check and delivery handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

use crate::config::GatewayConfig;
use crate::config::ValidationError;
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::updater::ScriptUpdater;
use crate::webhook::event::{DeliveryHeaders, EventDisposition, EventFilter, PushSummary};
use crate::webhook::outcome::DeliveryOutcome;
use crate::webhook::signature::SignatureVerifier;

/// Body returned by the liveness check.
pub const HEALTH_BODY: &str = "Webhook server is running";

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub verifier: Arc<SignatureVerifier>,
    pub filter: Arc<EventFilter>,
    pub updater: Arc<ScriptUpdater>,
}

impl GatewayState {
    pub fn new(verifier: SignatureVerifier, filter: EventFilter, updater: ScriptUpdater) -> Self {
        Self {
            verifier: Arc::new(verifier),
            filter: Arc::new(filter),
            updater: Arc::new(updater),
        }
    }

    /// Build state from a configuration. Fails if no secret is configured.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ValidationError> {
        let secret = config
            .webhook
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingSecret)?;

        Ok(Self::new(
            SignatureVerifier::new(secret),
            EventFilter::new(config.webhook.accepted_event.clone()),
            ScriptUpdater::from_config(&config.updater),
        ))
    }
}

/// `GET {path}`: always 200, ignores headers and body.
pub async fn health_check() -> &'static str {
    HEALTH_BODY
}

/// `POST {path}`: verify, filter, dispatch.
pub async fn handle_event(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> DeliveryOutcome {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let delivery = DeliveryHeaders::from_headers(&headers);
    let delivery_id = delivery.delivery_id.as_deref().unwrap_or("unknown");

    let outcome = dispatch(&state, &delivery, &body).await;

    match outcome {
        DeliveryOutcome::Unauthorized => tracing::warn!(
            request_id = %request_id,
            delivery_id = %delivery_id,
            body_len = body.len(),
            "Rejected delivery with invalid signature"
        ),
        DeliveryOutcome::Ignored => tracing::info!(
            request_id = %request_id,
            delivery_id = %delivery_id,
            event = delivery.event.as_deref().unwrap_or(""),
            "Ignored event"
        ),
        _ => tracing::info!(
            request_id = %request_id,
            delivery_id = %delivery_id,
            outcome = outcome.label(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Delivery processed"
        ),
    }
    metrics::record_delivery(outcome.label(), start);

    outcome
}

async fn dispatch(state: &GatewayState, delivery: &DeliveryHeaders, body: &[u8]) -> DeliveryOutcome {
    if !state.verifier.verify(body, &delivery.signature) {
        return DeliveryOutcome::Unauthorized;
    }

    if state.filter.classify(delivery.event.as_deref()) == EventDisposition::Ignored {
        return DeliveryOutcome::Ignored;
    }

    if let Some(push) = PushSummary::from_body(body) {
        tracing::info!(
            git_ref = push.git_ref.as_deref().unwrap_or(""),
            head_commit = push.head_commit.as_deref().unwrap_or(""),
            pusher = push.pusher.as_deref().unwrap_or(""),
            "Push received, triggering update"
        );
    }

    // The updater logs its own stdout/stderr.
    match state.updater.run().await {
        Ok(_) => DeliveryOutcome::Succeeded,
        Err(_) => DeliveryOutcome::Failed,
    }
}
