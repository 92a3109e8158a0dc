//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the Axum router: static assets, workspace files, JSON API
//! - Wire up middleware (request ID, tracing, body limit, timeout)
//! - Serve on an already bound listener until shutdown

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, http::StatusCode, Router};
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, timeout::TimeoutLayer};

use crate::config::{LimitsConfig, ServerConfig};
use crate::http::api::{self, API_PREFIX};
use crate::http::request;
use crate::net::ServerHandle;
use crate::store::Store;
use crate::workspace::WorkspacePath;

/// Prefix under which workspace files are served read-only.
pub const DATA_PREFIX: &str = "/data";

/// Build the application router.
///
/// Takes the opened store by value: the API cannot be mounted before the
/// store exists.
pub fn build_router(store: Store, workspace: &WorkspacePath, config: &ServerConfig) -> Router {
    let assets = Path::new(&config.assets.build_dir);
    if !assets.is_dir() {
        tracing::warn!(
            build_dir = %assets.display(),
            "Asset directory missing, front-end requests will 404"
        );
    }

    let app = Router::new()
        .nest(API_PREFIX, api::router(store))
        .nest_service(DATA_PREFIX, ServeDir::new(workspace.as_path()))
        .fallback_service(ServeDir::new(assets));

    with_middleware(app, &config.limits)
}

/// Wrap `app` in the request ID, tracing, body limit and timeout layers.
///
/// The timeout sits innermost so it wraps the routes directly.
pub fn with_middleware(app: Router, limits: &LimitsConfig) -> Router {
    app.layer(DefaultBodyLimit::disable()).layer(
        ServiceBuilder::new()
            .layer(request::set_request_id())
            .layer(request::trace())
            .layer(request::propagate_request_id())
            .layer(RequestBodyLimitLayer::new(limits.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(limits.request_timeout_secs),
            )),
    )
}

/// HTTP server bound to a listener.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Accept connections until `shutdown` fires.
    pub async fn run(
        self,
        handle: ServerHandle,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let listener = handle.into_inner();
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
