//! FRED MCP Server Entry Point
//!
//! Initializes logging, loads configuration, checks the FRED API key and
//! starts the server with the configured transport.

use anyhow::Result;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fred_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("FRED API: {}", config.fred.base_url);

    let server = McpServer::new(config.clone())?;

    if server.client().is_configured() {
        match server.client().check_connectivity().await {
            Ok(()) => info!("FRED API key verified"),
            Err(e) => error!("FRED API check failed: {}", e),
        }
    } else {
        warn!(
            "FRED_API_KEY not set - tools will return a configuration error. \
             Get a free key at https://fred.stlouisfed.org/docs/api/api_key.html"
        );
    }

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol in STDIO mode.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
