//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the optional config file
//! - Overlay environment and command-line values, once
//! - Validate before anything binds
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Precedence: CLI flag > environment > config file > defaults

use std::path::PathBuf;

use crate::config::{read_config, ConfigError, GatewayConfig};

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
}

/// Produce the validated configuration the server will run with.
pub fn resolve_config<I, K, V>(options: &StartupOptions, env: I) -> Result<GatewayConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let base = match &options.config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading config file");
            read_config(path)?
        }
        None => GatewayConfig::default(),
    };

    let mut config = base.apply_env(env)?;
    if let Some(port) = options.port {
        config.listener.port = port;
    }

    config.validated()
}
