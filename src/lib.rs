//! Blog Content Webhook Gateway Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod updater;
pub mod webhook;

pub use config::schema::GatewayConfig;
pub use http::WebhookServer;
pub use lifecycle::Shutdown;
