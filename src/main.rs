//! Todo MCP Server entry point.
//!
//! Initializes logging, loads configuration, selects the storage backend and
//! serves the configured transport until it stops.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use todo_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging must be up before config loading so its warnings are visible.
    dotenvy::dotenv().ok();
    let level = std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&level);

    let config = Config::from_env();
    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone());
    let backend = server.open().await?;
    info!("Serving todo items from the {} backend", backend);

    let result = TransportService::new(config.transport)
        .run(server.clone())
        .await;

    server.shutdown().await;
    info!("Server shut down");

    Ok(result?)
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr because stdout carries the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
