//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the shared signing secret.
pub const ENV_SECRET: &str = "WEBHOOK_SECRET";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from a TOML file without validating it.
///
/// Validation is deferred so environment overrides can fill in the secret.
pub fn read_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl GatewayConfig {
    /// Overlay `WEBHOOK_SECRET` and `PORT` from the given variables.
    ///
    /// Called once at startup with `std::env::vars()`; nothing downstream
    /// reads the environment.
    pub fn apply_env<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            match key.as_ref() {
                ENV_SECRET => self.webhook.secret = Some(value.into()),
                ENV_PORT => {
                    let raw: String = value.into();
                    self.listener.port = raw.trim().parse().map_err(|_| {
                        ConfigError::Validation(vec![ValidationError::InvalidPort(raw.clone())])
                    })?;
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Run semantic validation, converting failures into a [`ConfigError`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        validate_config(&self).map_err(ConfigError::Validation)?;
        Ok(self)
    }
}
