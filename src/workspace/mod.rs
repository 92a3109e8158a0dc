//! Workspace subsystem.
//!
//! # Data Flow
//! ```text
//! Option<String> from the CLI
//!     → resolver.rs (default, absolutize, existence check)
//!     → WorkspacePath (absolute, immutable)
//!     → store root + /data/ file serving
//! ```
//!
//! # Design Decisions
//! - Checked once, synchronously, before anything async starts
//! - A missing workspace leaves no open store and no bound socket

pub mod resolver;

pub use resolver::{resolve, WorkspaceError, WorkspacePath, DEFAULT_WORKSPACE};
