//! Command-line surface.
//!
//! # Data Flow
//! ```text
//! std::env::args_os()
//!     → args.rs (clap parse, precedence rules)
//!     → Command::{Help, Version, Serve}
//!     → main.rs prints / exits / starts the bootstrap
//! ```

pub mod args;

pub use args::{parse, usage, version, ArgumentError, Command, InvocationArgs, ServeOptions};
