//! Invocation argument parsing.
//!
//! # Responsibilities
//! - Recognize `--help`, `--version`, `--debug` and their short forms
//! - Accept zero or one workspace path
//! - Reject unknown flags and extra positionals
//!
//! # Design Decisions
//! - Parsing is pure: no printing, no exit. The binary decides what to do
//!   with a [`Command`] or an [`ArgumentError`]
//! - Help and version are plain flags (clap's eager handlers are disabled) so
//!   their precedence is decided here: version, then help, then validation

use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use thiserror::Error;

/// Flags and positionals exactly as given on the command line.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "pixano",
    about = "pixano - Annotation Application server",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct InvocationArgs {
    /// Shows this help message
    #[arg(short, long)]
    pub help: bool,

    /// Displays the current version
    #[arg(short, long)]
    pub version: bool,

    /// Show debugging information
    #[arg(short, long)]
    pub debug: bool,

    /// Workspace directory to serve (defaults to /data/)
    #[arg(value_name = "WORKSPACE_PATH")]
    pub paths: Vec<String>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit successfully.
    Help,
    /// Print the package version and exit successfully.
    Version,
    /// Start the server.
    Serve(ServeOptions),
}

/// Options for a server run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeOptions {
    /// Workspace path as typed by the operator, if any.
    pub workspace: Option<String>,
    /// Verbose logging.
    pub debug: bool,
}

/// Malformed command line.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// Unknown flag or otherwise unparsable input.
    #[error(transparent)]
    Invalid(#[from] clap::Error),

    /// More than one positional path.
    #[error("Please provide one workspace path argument at maximum (got {0})")]
    TooManyPaths(usize),
}

impl InvocationArgs {
    /// Decide the command. Version beats help, and both beat path checks.
    pub fn into_command(self) -> Result<Command, ArgumentError> {
        if self.version {
            return Ok(Command::Version);
        }
        if self.help {
            return Ok(Command::Help);
        }
        if self.paths.len() > 1 {
            return Err(ArgumentError::TooManyPaths(self.paths.len()));
        }

        Ok(Command::Serve(ServeOptions {
            workspace: self.paths.into_iter().next(),
            debug: self.debug,
        }))
    }
}

/// Parse a full argument list (program name first).
pub fn parse<I, T>(args: I) -> Result<Command, ArgumentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    InvocationArgs::try_parse_from(args)?.into_command()
}

/// Usage text printed for `--help` and after workspace errors.
pub fn usage() -> String {
    InvocationArgs::command().render_help().to_string()
}

/// Package version printed for `--version`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
