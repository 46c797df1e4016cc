//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the webhook routes
//! - Wire up middleware (tracing, request ID, deadline, body limit)
//! - Bind server to listener
//! - Stop accepting on shutdown signal

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig};
use crate::http::request::X_REQUEST_ID;
use crate::resilience::timeouts::{deadline_middleware, RequestDeadline};
use crate::webhook::handler::{handle_event, health_check, GatewayState};

/// HTTP server for the webhook gateway.
pub struct WebhookServer {
    router: Router,
    config: GatewayConfig,
}

impl WebhookServer {
    /// Create a new server from a configuration.
    ///
    /// The configuration is validated here, so a server cannot exist without
    /// a signing secret.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let state = GatewayState::from_config(&config)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: GatewayState) -> Router {
        let deadline = RequestDeadline::from_secs(config.timeouts.request_secs);

        Router::new()
            .route(&config.webhook.path, get(health_check).post(handle_event))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(deadline, deadline_middleware))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.webhook.path,
            accepted_event = %self.config.webhook.accepted_event,
            script = %self.config.updater.script_path.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
