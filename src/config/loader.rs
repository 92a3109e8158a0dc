//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "PIXANO_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{} must be a port number, got {:?}", PORT_ENV, .0)]
    Port(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the configuration from explicit variable values.
///
/// `config_path` is loaded first (defaults otherwise), then `port` overrides
/// the listener port.
pub fn from_vars(config_path: Option<&str>, port: Option<&str>) -> Result<ServerConfig, ConfigError> {
    let mut config = match config_path {
        Some(path) => load_config(Path::new(path))?,
        None => ServerConfig::default(),
    };

    if let Some(raw) = port {
        config.listener.port = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Port(raw.to_string()))?;
    }

    Ok(config)
}

/// Build the configuration from `PIXANO_CONFIG` and `PORT`.
pub fn from_env() -> Result<ServerConfig, ConfigError> {
    let config_path = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());
    let port = std::env::var(PORT_ENV).ok().filter(|p| !p.is_empty());
    from_vars(config_path.as_deref(), port.as_deref())
}
