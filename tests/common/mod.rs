//! Shared utilities for end-to-end webhook tests.

use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use blog_webhook::config::GatewayConfig;
use blog_webhook::lifecycle::Shutdown;
use blog_webhook::webhook::event::{X_GITHUB_EVENT, X_HUB_SIGNATURE_256};
use blog_webhook::webhook::sign;
use blog_webhook::WebhookServer;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const SECRET: &str = "abc";

/// Write an executable `/bin/sh` stub update procedure.
pub fn write_stub(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Stub that touches `marker` and exits with `code`.
pub fn spy_stub(dir: &TempDir, code: i32) -> (PathBuf, PathBuf) {
    let marker = dir.path().join("invoked");
    let script = write_stub(
        dir,
        "pull.sh",
        &format!("echo pulling\ntouch {}\nexit {code}", marker.display()),
    );
    (script, marker)
}

/// Config pointing at `script`, signed with [`SECRET`].
pub fn config_for(script: &Path) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.webhook.secret = Some(SECRET.into());
    config.updater.script_path = script.to_path_buf();
    config
}

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    pub async fn start(config: GatewayConfig) -> Self {
        let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = WebhookServer::new(config).unwrap();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/webhook", self.addr)
    }

    /// POST `body` with the given signature and event headers.
    pub async fn post(&self, body: &'static [u8], signature: &str, event: &str) -> (u16, String) {
        let res = self
            .client
            .post(self.url())
            .header(X_HUB_SIGNATURE_256, signature)
            .header(X_GITHUB_EVENT, event)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("gateway unreachable");
        let status = res.status().as_u16();
        (status, res.text().await.unwrap())
    }

    /// POST `body` correctly signed with [`SECRET`].
    pub async fn post_signed(&self, body: &'static [u8], event: &str) -> (u16, String) {
        self.post(body, &sign(SECRET.as_bytes(), body), event).await
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
