//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! PIXANO_CONFIG (optional TOML file)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PORT override
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults so no file is needed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_env, ConfigError};
pub use schema::{AssetsConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, ServerConfig};
