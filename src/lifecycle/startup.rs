//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the workspace
//! - Open the store and wait for it
//! - Mount routes, then bind the listener
//! - Compute the readiness information once listening
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - Steps run in order, never concurrently
//! - The listener is bound last (traffic only when ready)
//! - Every phase change is published on a watch channel
//! - `start` consumes the bootstrap, so startup runs exactly once

use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tokio::sync::{broadcast, watch};

use crate::cli::{ArgumentError, ServeOptions};
use crate::config::{ConfigError, ServerConfig};
use crate::http::server::{build_router, HttpServer};
use crate::lifecycle::readiness::ReachabilityInfo;
use crate::net::{ListenerBindError, ServerHandle};
use crate::observability::metrics;
use crate::store::{Store, StoreInitError, StoreOpener};
use crate::workspace::{self, WorkspaceError, WorkspacePath};

/// Startup state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    ArgsParsed,
    WorkspaceValidated,
    StoreOpening,
    StoreOpened,
    RoutesMounted,
    Listening,
    /// Terminal: startup aborted.
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::ArgsParsed => "args_parsed",
            Phase::WorkspaceValidated => "workspace_validated",
            Phase::StoreOpening => "store_opening",
            Phase::StoreOpened => "store_opened",
            Phase::RoutesMounted => "routes_mounted",
            Phase::Listening => "listening",
            Phase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way startup can fail. All are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Please enter a valid path for workspace: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    StoreInit(#[from] StoreInitError),

    #[error(transparent)]
    ListenerBind(#[from] ListenerBindError),
}

impl StartupError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Whether the usage text should follow the diagnostic.
    pub fn shows_usage(&self) -> bool {
        matches!(self, StartupError::Workspace(_))
    }
}

/// A fully started server: store open, routes mounted, listener bound.
pub struct Running {
    pub workspace: WorkspacePath,
    pub store: Store,
    pub handle: ServerHandle,
    pub router: Router,
    /// `None` when the bound address could not be read.
    pub reachability: Option<ReachabilityInfo>,
}

impl Running {
    /// Serve until `shutdown` fires, then flush the store.
    pub async fn serve(self, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        HttpServer::new(self.router).run(self.handle, shutdown).await?;

        if let Err(e) = self.store.flush().await {
            tracing::warn!(error = %e, "Failed to flush store on shutdown");
        }
        Ok(())
    }
}

/// Drives startup from parsed arguments to a bound listener.
pub struct Bootstrap<O> {
    options: ServeOptions,
    config: ServerConfig,
    opener: O,
    phase: watch::Sender<Phase>,
    started: Instant,
}

impl<O: StoreOpener> Bootstrap<O> {
    /// Create a bootstrap for already parsed arguments.
    pub fn new(options: ServeOptions, config: ServerConfig, opener: O) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        let bootstrap = Self {
            options,
            config,
            opener,
            phase,
            started: Instant::now(),
        };
        bootstrap.advance(Phase::ArgsParsed);
        bootstrap
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Observe phase changes.
    pub fn phases(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run startup to `Listening`, or to `Failed`.
    ///
    /// Consumes the bootstrap: the store and the listener are created at most
    /// once, and the phase channel closes in its final state. Take a
    /// [`phases`](Self::phases) receiver first to observe it.
    pub async fn start(self) -> Result<Running, StartupError> {
        match self.try_start().await {
            Ok(running) => Ok(running),
            Err(e) => {
                self.advance(Phase::Failed);
                tracing::error!(error = %e, "Startup failed");
                Err(e)
            }
        }
    }

    async fn try_start(&self) -> Result<Running, StartupError> {
        // Blocking existence check, before anything async.
        let workspace = workspace::resolve(self.options.workspace.as_deref())?;
        self.advance(Phase::WorkspaceValidated);

        self.advance(Phase::StoreOpening);
        let store = self.opener.open(workspace.as_path()).await?;
        tracing::info!(path = %store.root().display(), "Store opened");
        self.advance(Phase::StoreOpened);

        let router = build_router(store.clone(), &workspace, &self.config);
        self.advance(Phase::RoutesMounted);

        let handle = ServerHandle::bind(&self.config.listener).await?;
        self.advance(Phase::Listening);

        let reachability = ReachabilityInfo::resolve(&handle);

        Ok(Running {
            workspace,
            store,
            handle,
            router,
            reachability,
        })
    }

    fn advance(&self, next: Phase) {
        let previous = self.phase.send_replace(next);
        tracing::debug!(from = %previous, to = %next, "Startup phase");
        metrics::record_startup_phase(next.as_str(), self.started);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_only_workspace_errors_show_usage() {
        let missing = StartupError::from(WorkspaceError::NotFound(PathBuf::from("/nope")));
        assert!(missing.shows_usage());
        assert_eq!(missing.exit_code(), 1);
        assert!(missing.to_string().starts_with("Please enter a valid path for workspace"));

        let args = StartupError::from(ArgumentError::TooManyPaths(2));
        assert!(!args.shows_usage());
        assert_eq!(args.exit_code(), 1);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::StoreOpening.to_string(), "store_opening");
        assert_eq!(Phase::Failed.as_str(), "failed");
    }
}
