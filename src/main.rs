//! Pixano annotation server.
//!
//! # Startup Overview
//!
//! ```text
//!   argv ──▶ cli::parse ──▶ Help / Version ──▶ print, exit 0
//!                │
//!                ▼
//!          ServeOptions ──▶ config (PIXANO_CONFIG, PORT) ──▶ logging
//!                │
//!                ▼
//!   ┌──────────────────────────── Bootstrap ────────────────────────────┐
//!   │ workspace::resolve ──▶ StoreOpener::open ──▶ build_router ──▶ bind │
//!   └───────────────────────────────────────────────────────────────────┘
//!                │
//!                ▼
//!        readiness report ──▶ serve until Ctrl+C ──▶ flush store
//! ```
//!
//! Every failure prints a diagnostic and exits with status 1.

use std::process::ExitCode;

use pixano_server::cli::{self, Command};
use pixano_server::config;
use pixano_server::lifecycle::{render_report, signals, Bootstrap, Shutdown, StartupError};
use pixano_server::observability::logging;
use pixano_server::store::SledOpener;

#[tokio::main]
async fn main() -> ExitCode {
    let options = match cli::parse(std::env::args_os()) {
        Ok(Command::Version) => {
            println!("{}", cli::version());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Help) => {
            println!("{}", cli::usage());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Serve(options)) => options,
        Err(e) => return fail(e.into()),
    };

    let config = match config::from_env() {
        Ok(config) => config,
        Err(e) => return fail(e.into()),
    };

    logging::init(options.debug, &config.observability.log_level);
    tracing::info!(version = cli::version(), "pixano starting");

    let bootstrap = Bootstrap::new(options, config, SledOpener);
    let running = match bootstrap.start().await {
        Ok(running) => running,
        Err(e) => return fail(e),
    };

    if let Some(info) = &running.reachability {
        println!("{}", render_report(&running.workspace, info));
    }

    let shutdown = Shutdown::new();
    signals::spawn_ctrl_c(shutdown.clone());

    if let Err(e) = running.serve(shutdown.subscribe()).await {
        tracing::error!(error = %e, "Server error");
        eprintln!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

fn fail(error: StartupError) -> ExitCode {
    eprintln!("{}", error);
    if error.shows_usage() {
        println!("{}", cli::usage());
    }
    ExitCode::from(error.exit_code())
}
