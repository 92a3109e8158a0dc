//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Bound listener
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → /api/v1/*  → api.rs (JSON over store partitions)
//!     → /data/*    → workspace files (read-only)
//!     → /*         → built front-end assets
//! ```

pub mod api;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_router, HttpServer, DATA_PREFIX};
