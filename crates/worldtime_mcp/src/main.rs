use std::env;

use clap::Parser;
use tracing_subscriber::{self, EnvFilter};

mod cli;
mod core;
mod server;

/// Worldtime MCP Server
///
/// Answers three kinds of time queries over MCP stdio:
/// - Tools: current time per timezone, HH:MM conversion, natural-language parsing
/// - Resources: server status and help documentation
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-worldtime
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Cli::parse();

    // Initialize logging only if LOG_LEVEL environment variable is set
    if let Ok(log_level) = env::var("LOG_LEVEL") {
        // Log to stderr without ANSI; stdout carries the protocol
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting Worldtime MCP server with log level: {}", log_level);
    }

    if let Err(e) = server::run(args.local_timezone).await {
        // Only log error if logging is initialized
        if env::var("LOG_LEVEL").is_ok() {
            tracing::error!("Error running Worldtime MCP server: {}", e);
        }
        return Err(e);
    }

    Ok(())
}
