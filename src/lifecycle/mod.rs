//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     ArgsParsed → WorkspaceValidated → StoreOpening → StoreOpened
//!         → RoutesMounted → Listening        (any failure → Failed)
//!
//! Readiness (readiness.rs):
//!     Listening → bound address + LAN address → boxed report
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C → broadcast → server stops accepting → store flushed
//! ```
//!
//! # Design Decisions
//! - Ordered startup: workspace, then store, then routes, then listener
//! - The store handle is passed along, never looked up globally
//! - No retries anywhere: the server is fully up or the process exits

pub mod readiness;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use readiness::{render_report, ReachabilityInfo};
pub use shutdown::Shutdown;
pub use startup::{Bootstrap, Phase, Running, StartupError};
