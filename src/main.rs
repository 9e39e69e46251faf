//! DB Gateway MCP Server - Main entry point.
//!
//! This server exposes one SQL database (PostgreSQL, MySQL/MariaDB, SQLite)
//! to AI assistants through three read-only MCP tools.

use db_gateway_mcp::config::{Config, TransportMode};
use db_gateway_mcp::transport::{HttpTransport, StdioTransport, Transport};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the stdio protocol stream. An
/// optional log file receives the same events without ANSI colors.
fn init_tracing(config: &Config) -> std::io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let log_file = match &config.log_file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        let file_layer =
            log_file.map(|file| fmt::layer().json().with_ansi(false).with_writer(Mutex::new(file)));
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(file_layer)
            .init();
    } else {
        let file_layer = log_file.map(|file| {
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .with(file_layer)
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Variables already in the environment take precedence over .env
    let dotenv = dotenvy::dotenv();

    let config = Config::parse_args();
    init_tracing(&config)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!(
        transport = %config.transport,
        "Starting DB Gateway MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let driver_config = config.driver_config();
    match driver_config.validate() {
        Ok(db_type) => info!(
            db_type = %db_type,
            url = %driver_config.masked_connection_string(),
            "Driver configuration valid"
        ),
        // Keep serving; every tool call reports the problem to the client
        Err(e) => warn!(error = %e, "Driver configuration invalid"),
    }

    let driver_config = Arc::new(driver_config);
    let query_timeout = config.query_timeout_duration();

    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(driver_config, query_timeout);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                driver_config,
                query_timeout,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
