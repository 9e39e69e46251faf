//! Connection lifecycle.
//!
//! A [`ConnectionManager`] owns at most one live backend connection, opened
//! lazily from a validated [`DriverConfig`] and released exactly once.
//! Backends are reached through database-specific sqlx connections
//! (`MySqlConnection`, `PgConnection`, `SqliteConnection`) rather than the
//! `Any` driver, so every backend keeps its full type support.

use crate::error::{DbError, DbResult, describe_sqlx_error};
use crate::models::{DatabaseType, DriverConfig};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Executor, MySqlConnection, PgConnection, SqliteConnection};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Statements that make the session reject writes for the rest of its life.
mod read_only {
    pub const POSTGRES: &str = "SET SESSION CHARACTERISTICS AS TRANSACTION READ ONLY";
    pub const MYSQL: &str = "SET SESSION TRANSACTION READ ONLY";
}

/// Database-specific connection (avoids `Any` driver limitations).
#[derive(Debug)]
pub enum DbConnection {
    MySql(MySqlConnection),
    Postgres(PgConnection),
    SQLite(SqliteConnection),
}

impl DbConnection {
    /// Get the database type for this connection.
    pub fn db_type(&self) -> DatabaseType {
        match self {
            DbConnection::MySql(_) => DatabaseType::MySQL,
            DbConnection::Postgres(_) => DatabaseType::PostgreSQL,
            DbConnection::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Gracefully close the connection.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        match self {
            DbConnection::MySql(conn) => conn.close().await,
            DbConnection::Postgres(conn) => conn.close().await,
            DbConnection::SQLite(conn) => conn.close().await,
        }
    }

    /// Put the session into read-only mode where the backend supports it.
    ///
    /// SQLite connections are opened read-only, so there is nothing to do.
    async fn enter_read_only(&mut self) -> Result<(), sqlx::Error> {
        match self {
            DbConnection::MySql(conn) => conn.execute(read_only::MYSQL).await.map(|_| ()),
            DbConnection::Postgres(conn) => conn.execute(read_only::POSTGRES).await.map(|_| ()),
            DbConnection::SQLite(_) => Ok(()),
        }
    }
}

/// Owns the single backend connection of one client.
#[derive(Debug)]
pub struct ConnectionManager {
    config: DriverConfig,
    db_type: DatabaseType,
    connection: Option<DbConnection>,
}

impl ConnectionManager {
    /// Create a manager for a validated configuration.
    ///
    /// No connection is opened here; configuration problems are reported
    /// before any network activity.
    pub fn new(config: DriverConfig) -> DbResult<Self> {
        let db_type = config.validate()?;
        Ok(Self {
            config,
            db_type,
            connection: None,
        })
    }

    /// Check whether a live connection is held.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Open the backend connection. A no-op when already connected.
    pub async fn connect(&mut self) -> DbResult<()> {
        if self.is_connected() {
            return Ok(());
        }

        let start = Instant::now();
        self.log_driver_artifact();
        info!(
            db_type = %self.db_type,
            url = %self.config.masked_connection_string(),
            "Connecting to database"
        );

        let url = self.config.normalized_connection_string();
        let opened = match self.db_type {
            DatabaseType::MySQL => open_mysql(&url, &self.config)
                .await
                .map(DbConnection::MySql),
            DatabaseType::PostgreSQL => open_postgres(&url, &self.config)
                .await
                .map(DbConnection::Postgres),
            DatabaseType::SQLite => open_sqlite(&url).await.map(DbConnection::SQLite),
        };
        let mut connection = opened.map_err(|e| self.connection_error(&e))?;

        if let Err(e) = connection.enter_read_only().await {
            warn!(
                db_type = %self.db_type,
                error = %self.config.redact(&e.to_string()),
                "Could not switch session to read-only; relying on statement validation"
            );
        }

        info!(
            db_type = %self.db_type,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Connected successfully"
        );
        self.connection = Some(connection);
        Ok(())
    }

    /// Borrow the live connection, connecting first if needed.
    pub async fn connection(&mut self) -> DbResult<&mut DbConnection> {
        self.connect().await?;
        self.connection
            .as_mut()
            .ok_or_else(|| DbError::internal("connection missing after connect"))
    }

    /// Release the connection. Safe to call any number of times.
    ///
    /// Errors while closing are logged and swallowed.
    pub async fn close(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        let db_type = connection.db_type();
        match connection.close().await {
            Ok(()) => debug!(db_type = %db_type, "Connection closed"),
            Err(e) => warn!(
                db_type = %db_type,
                error = %self.config.redact(&e.to_string()),
                "Error while closing connection"
            ),
        }
    }

    /// Drop the connection without a close handshake.
    ///
    /// Used when an operation was cut short and the backend may still be busy.
    pub fn abort(&mut self) {
        if let Some(connection) = self.connection.take() {
            debug!(db_type = %connection.db_type(), "Connection dropped without close handshake");
        }
    }

    fn log_driver_artifact(&self) {
        let path = &self.config.driver_artifact_path;
        match std::fs::metadata(path) {
            Ok(meta) => debug!(
                driver = %self.config.driver_class.trim(),
                artifact = %path.display(),
                size = %humansize::format_size(meta.len(), humansize::BINARY),
                "Using built-in driver; artifact verified"
            ),
            Err(e) => warn!(
                artifact = %path.display(),
                error = %e,
                "Driver artifact no longer readable"
            ),
        }
    }

    /// Build a sanitized connection error.
    fn connection_error(&self, error: &sqlx::Error) -> DbError {
        let (message, _) = describe_sqlx_error(error);
        let message = self.config.redact(&message);
        let suggestion = connection_suggestion(self.db_type, &message);
        warn!(
            db_type = %self.db_type,
            url = %self.config.masked_connection_string(),
            error = %message,
            "Connection attempt failed"
        );
        DbError::connection(message, suggestion)
    }
}

async fn open_mysql(url: &str, config: &DriverConfig) -> Result<MySqlConnection, sqlx::Error> {
    MySqlConnectOptions::from_str(url)?
        .username(config.username.trim())
        .password(&config.password)
        .charset("utf8mb4")
        .connect()
        .await
}

async fn open_postgres(url: &str, config: &DriverConfig) -> Result<PgConnection, sqlx::Error> {
    PgConnectOptions::from_str(url)?
        .username(config.username.trim())
        .password(&config.password)
        .connect()
        .await
}

/// SQLite has no users; credentials are accepted and ignored.
async fn open_sqlite(url: &str) -> Result<SqliteConnection, sqlx::Error> {
    SqliteConnectOptions::from_str(url)?
        .read_only(true)
        .connect()
        .await
}

/// Generate a helpful suggestion for connection errors.
fn connection_suggestion(db_type: DatabaseType, message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("connection refused") {
        return format!(
            "Check that the {} server is running and accessible",
            db_type
        );
    }

    if lower.contains("authentication") || lower.contains("password") || lower.contains("denied") {
        return "Verify DB_USERNAME and DB_PASSWORD".to_string();
    }

    if lower.contains("does not exist") || lower.contains("unknown database") {
        return "Check that the database name exists".to_string();
    }

    if lower.contains("tls") || lower.contains("ssl") {
        return "Check TLS/SSL configuration or try disabling it".to_string();
    }

    match db_type {
        DatabaseType::PostgreSQL => {
            "Verify the connection string format: jdbc:postgresql://host:5432/db".to_string()
        }
        DatabaseType::MySQL => {
            "Verify the connection string format: jdbc:mysql://host:3306/db".to_string()
        }
        DatabaseType::SQLite => {
            "Verify the file path exists and is accessible: sqlite:path/to/db.sqlite".to_string()
        }
    }
}
