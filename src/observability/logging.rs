//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the log level from `--debug`, config, or `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` always wins over flags and config
//! - Logs go to stderr; stdout is reserved for usage, version and the
//!   readiness report

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(debug: bool, level: &str) -> String {
    let level = if debug { "debug" } else { level };
    format!("pixano={level},pixano_server={level},tower_http={level}")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(debug: bool, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(debug, level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
