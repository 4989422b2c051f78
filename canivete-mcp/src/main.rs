//! Canivete MCP Server
//!
//! Exposes the unit conversion engine over MCP (line-delimited JSON-RPC on
//! stdin/stdout). Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - list_units: List the units of a category
//! - list_categories: List all categories
//!
//! Environment:
//! - RUST_LOG: log filter (default: info)
//! - CANIVETE_DISPLAY_DECIMALS: decimals in text results (default: 6)

mod config;
mod handlers;
mod protocol;
mod server;

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use config::ServerConfig;
use handlers::{PROTOCOL_VERSION, SERVER_VERSION};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config = ServerConfig::from_env();

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Canivete MCP Server started");
    tracing::info!(
        display_decimals = config.display_decimals,
        stdin_is_terminal = io::stdin().is_terminal(),
        "server ready, waiting for requests"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();

    match server::serve(stdin.lock(), stdout.lock(), &config) {
        Ok(()) => {
            tracing::info!("server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "i/o error, shutting down");
            ExitCode::FAILURE
        }
    }
}
