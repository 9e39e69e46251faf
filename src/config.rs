//! Configuration handling for the DB Gateway MCP Server.
//!
//! This module provides configuration management via CLI arguments and environment variables.
//! A `.env` file in the working directory is loaded by the binary before parsing, so every
//! variable below may also live there.

use crate::models::{DEFAULT_QUERY_TIMEOUT_SECS, DriverConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8000;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Configuration for the DB Gateway MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "db-gateway-mcp",
    about = "Read-only MCP gateway to a SQL database - lets AI assistants query and inspect one database",
    version,
    author
)]
pub struct Config {
    /// Database connection string (jdbc: prefix accepted)
    #[arg(long, alias = "db-url", env = "JDBC_URL")]
    pub jdbc_url: Option<String>,

    /// Driver class or name (e.g. org.postgresql.Driver, mysql, sqlite)
    #[arg(long, alias = "db-driver", env = "JDBC_DRIVER")]
    pub jdbc_driver: Option<String>,

    /// Path to the vendor driver artifact; must be an existing readable file
    #[arg(long, alias = "db-driver-path", value_name = "PATH", env = "JDBC_DRIVER_PATH")]
    pub jdbc_driver_path: Option<PathBuf>,

    /// Database user
    #[arg(long, env = "DB_USERNAME")]
    pub db_username: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Transport mode (stdio or http)
    #[arg(
        short,
        long,
        value_enum,
        default_value = "stdio",
        env = "MCP_TRANSPORT"
    )]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_HTTP_HOST,
        env = "MCP_HTTP_HOST"
    )]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(
        long,
        default_value_t = DEFAULT_HTTP_PORT,
        env = "MCP_HTTP_PORT"
    )]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_MCP_ENDPOINT,
        env = "MCP_ENDPOINT"
    )]
    pub mcp_endpoint: String,

    /// Time limit in seconds for one tool call
    #[arg(
        long,
        default_value_t = DEFAULT_QUERY_TIMEOUT_SECS,
        env = "MCP_QUERY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub query_timeout: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH", env = "MCP_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            jdbc_url: None,
            jdbc_driver: None,
            jdbc_driver_path: None,
            db_username: None,
            db_password: None,
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            query_timeout: DEFAULT_QUERY_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
            log_file: None,
        }
    }

    /// The five driver settings as one value.
    ///
    /// Unset settings become empty and are reported by validation.
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig::new(
            self.jdbc_url.clone().unwrap_or_default(),
            self.jdbc_driver.clone().unwrap_or_default(),
            self.jdbc_driver_path.clone().unwrap_or_default(),
            self.db_username.clone().unwrap_or_default(),
            self.db_password.clone().unwrap_or_default(),
        )
    }

    /// Get the query timeout as a Duration.
    pub fn query_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transport, TransportMode::Stdio);
        assert_eq!(config.http_host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.mcp_endpoint, "/");
        assert_eq!(config.query_timeout_duration(), Duration::from_secs(30));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_parse_driver_arguments() {
        let config = Config::try_parse_from([
            "db-gateway-mcp",
            "--jdbc-url",
            "jdbc:postgresql://localhost:5432/app",
            "--jdbc-driver",
            "org.postgresql.Driver",
            "--jdbc-driver-path",
            "/opt/drivers/postgresql.jar",
            "--db-username",
            "reader",
            "--db-password",
            "secret",
            "--transport",
            "http",
        ])
        .unwrap();

        assert_eq!(config.transport, TransportMode::Http);
        let driver = config.driver_config();
        assert_eq!(driver.connection_string, "jdbc:postgresql://localhost:5432/app");
        assert_eq!(driver.driver_class, "org.postgresql.Driver");
        assert_eq!(driver.driver_artifact_path, PathBuf::from("/opt/drivers/postgresql.jar"));
        assert_eq!(driver.username, "reader");
        assert_eq!(driver.password, "secret");
    }

    #[test]
    fn test_db_flag_aliases() {
        let config = Config::try_parse_from([
            "db-gateway-mcp",
            "--db-url",
            "sqlite:app.db",
            "--db-driver",
            "org.sqlite.JDBC",
            "--db-driver-path",
            "/opt/drivers/sqlite.jar",
        ])
        .unwrap();

        let driver = config.driver_config();
        assert_eq!(driver.connection_string, "sqlite:app.db");
        assert_eq!(driver.driver_class, "org.sqlite.JDBC");
        assert_eq!(driver.driver_artifact_path, PathBuf::from("/opt/drivers/sqlite.jar"));
    }

    #[test]
    fn test_driver_settings_read_from_jdbc_environment() {
        let command = Config::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|env| env.to_str())
                .map(str::to_string)
        };
        assert_eq!(env_of("jdbc_url").as_deref(), Some("JDBC_URL"));
        assert_eq!(env_of("jdbc_driver").as_deref(), Some("JDBC_DRIVER"));
        assert_eq!(env_of("jdbc_driver_path").as_deref(), Some("JDBC_DRIVER_PATH"));
        assert_eq!(env_of("db_username").as_deref(), Some("DB_USERNAME"));
        assert_eq!(env_of("db_password").as_deref(), Some("DB_PASSWORD"));
    }

    #[test]
    fn test_unset_driver_settings_fail_validation() {
        let driver = Config::default().driver_config();
        assert!(driver.connection_string.is_empty());
        assert!(driver.validate().is_err());
    }

    #[test]
    fn test_zero_query_timeout_rejected() {
        let result = Config::try_parse_from(["db-gateway-mcp", "--query-timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_mode_display() {
        assert_eq!(TransportMode::Stdio.to_string(), "stdio");
        assert_eq!(TransportMode::Http.to_string(), "http");
    }
}
