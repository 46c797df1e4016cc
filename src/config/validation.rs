//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject deployments without a signing secret
//! - Validate value ranges (timeouts > 0, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("webhook secret is not configured (set WEBHOOK_SECRET or [webhook].secret)")]
    MissingSecret,

    #[error("webhook path must start with '/', got {0:?}")]
    InvalidPath(String),

    #[error("accepted event type must not be empty")]
    EmptyAcceptedEvent,

    #[error("update script path must be absolute, got {0:?}")]
    RelativeScriptPath(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.webhook.secret.as_deref() {
        Some(secret) if !secret.is_empty() => {}
        _ => errors.push(ValidationError::MissingSecret),
    }

    if !config.webhook.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(config.webhook.path.clone()));
    }

    if config.webhook.accepted_event.trim().is_empty() {
        errors.push(ValidationError::EmptyAcceptedEvent);
    }

    if !config.updater.script_path.is_absolute() {
        errors.push(ValidationError::RelativeScriptPath(
            config.updater.script_path.display().to_string(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
