//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the webhook gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Webhook endpoint and authentication settings.
    pub webhook: WebhookConfig,

    /// External update procedure settings.
    pub updater: UpdaterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind. All interfaces by default so a reverse proxy can reach us.
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Webhook endpoint configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Path serving both the liveness check (GET) and deliveries (POST).
    pub path: String,

    /// Shared HMAC secret. Required; there is no built-in fallback.
    pub secret: Option<String>,

    /// The only event type that triggers an update.
    pub accepted_event: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: "/webhook".to_string(),
            secret: None,
            accepted_event: "push".to_string(),
        }
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("path", &self.path)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("accepted_event", &self.accepted_event)
            .finish()
    }
}

/// External update procedure configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Absolute path of the executable. Invoked with no arguments.
    pub script_path: PathBuf,

    /// Allow at most one update to run at a time.
    pub serialize: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("/usr/local/bin/pull-articles.sh"),
            serialize: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Wall-clock ceiling for a whole request, measured from receipt.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 5 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.webhook.path, "/webhook");
        assert_eq!(config.webhook.accepted_event, "push");
        assert!(config.webhook.secret.is_none());
        assert_eq!(config.timeouts.request_secs, 5);
        assert!(config.updater.serialize);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [webhook]
            secret = "abc"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.webhook.secret.as_deref(), Some("abc"));
        assert_eq!(config.webhook.path, "/webhook");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.port, 3001);
    }

    #[test]
    fn debug_redacts_secret() {
        let webhook = WebhookConfig {
            secret: Some("hunter2".into()),
            ..WebhookConfig::default()
        };
        let rendered = format!("{:?}", webhook);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
