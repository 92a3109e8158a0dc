//! TCP listener binding.
//!
//! # Responsibilities
//! - Build the bind address from configuration
//! - Bind once; a failure is fatal and never retried
//! - Hand the bound socket to the HTTP server
//!
//! No connection limit is enforced here; accepted connections are served
//! concurrently by the HTTP stack.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener binding.
#[derive(Debug, Error)]
pub enum ListenerBindError {
    /// Configured host is not an IP address.
    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    /// The OS refused the bind (port in use, permission denied).
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// The bound listening socket.
///
/// Created exactly once per process, after the routes are mounted.
#[derive(Debug)]
pub struct ServerHandle {
    inner: TcpListener,
}

impl ServerHandle {
    /// Bind to the configured host and port.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerBindError> {
        let host: IpAddr = config
            .host
            .parse()
            .map_err(|_| ListenerBindError::InvalidHost(config.host.clone()))?;
        let address = SocketAddr::new(host, config.port);

        let inner = TcpListener::bind(address)
            .await
            .map_err(|source| ListenerBindError::Bind { address, source })?;

        if let Ok(local_addr) = inner.local_addr() {
            tracing::info!(address = %local_addr, "Listener bound");
        }

        Ok(Self { inner })
    }

    /// Address the socket actually bound to (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    pub fn into_inner(self) -> TcpListener {
        self.inner
    }
}
