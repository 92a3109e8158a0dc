//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pixano_server::config::ServerConfig;
use pixano_server::store::{SledOpener, Store, StoreInitError, StoreOpener};
use tokio::sync::Notify;

/// Loopback config on a free port, serving assets from `build_dir`.
pub fn test_config(build_dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.assets.build_dir = build_dir.to_string_lossy().into_owned();
    config
}

/// Find a port that is free right now.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// HTTP client that never goes through a proxy or reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

/// Counts open calls, then delegates to sled.
#[derive(Clone, Default)]
pub struct SpyOpener {
    pub calls: Arc<AtomicUsize>,
}

impl SpyOpener {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StoreOpener for SpyOpener {
    async fn open(&self, workspace: &Path) -> Result<Store, StoreInitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SledOpener.open(workspace).await
    }
}

/// Holds the open until `gate` is notified.
#[derive(Clone, Default)]
pub struct GatedOpener {
    pub gate: Arc<Notify>,
}

impl StoreOpener for GatedOpener {
    async fn open(&self, workspace: &Path) -> Result<Store, StoreInitError> {
        self.gate.notified().await;
        SledOpener.open(workspace).await
    }
}

/// Always fails, as a corrupt or locked store would.
#[derive(Clone, Default)]
pub struct FailingOpener;

impl StoreOpener for FailingOpener {
    async fn open(&self, workspace: &Path) -> Result<Store, StoreInitError> {
        Err(StoreInitError::Open {
            path: workspace.to_path_buf(),
            source: sled::Error::Unsupported("simulated corruption".to_string()),
        })
    }
}
