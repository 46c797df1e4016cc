//! Blog Content Webhook Gateway
//!
//! Receives repository push deliveries and refreshes the blog's content
//! directory by running a pull script.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /webhook            ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ deadline ─▶ signature ─▶ event ─▶ updater ─┼──▶ pull script
//!                              │   (5s/504)    (401)        (200     (200/500) │    (external)
//!     ◀────────────────────────┼──                          Ignored)          │
//!     plain-text response      │                                              │
//!                              │  GET /webhook ─▶ "Webhook server is running" │
//!                              └──────────────────────────────────────────────┘
//! ```
//!
//! The rendered blog reads the same content directory on disk; the two never
//! talk to each other directly.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use blog_webhook::lifecycle::{resolve_config, StartupOptions};
use blog_webhook::observability::{logging, metrics};
use blog_webhook::{Shutdown, WebhookServer};

#[derive(Parser)]
#[command(name = "blog-webhook")]
#[command(about = "Webhook receiver that pulls new blog content on push", long_about = None)]
struct Cli {
    /// Optional TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = StartupOptions {
        config_path: cli.config,
        port: cli.port,
    };

    // Environment is read here and nowhere else.
    let config = resolve_config(&options, std::env::vars())?;

    logging::init(&config.observability);
    tracing::info!("blog-webhook v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        serialize_updates = config.updater.serialize,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Webhook listening");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = WebhookServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
