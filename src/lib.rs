//! Pixano annotation server library.
//!
//! Startup sequencing for the local annotation server: argument parsing,
//! workspace validation, store opening, route mounting, listener binding and
//! the readiness report. The `pixano` binary is a thin shell over these.

// Entry surfaces
pub mod cli;
pub mod config;

// Core subsystems
pub mod http;
pub mod net;
pub mod store;
pub mod workspace;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use lifecycle::{Bootstrap, Phase, Shutdown, StartupError};
pub use store::{SledOpener, Store, StoreOpener};
