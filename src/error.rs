//! Error types for the DB Gateway MCP Server.
//!
//! Every failure the core can produce maps to exactly one [`DbError`] variant.
//! The tool layer turns any of them into an `{"error": "..."}` record, so the
//! `Display` text is what the calling agent sees and must stay free of
//! credentials.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Query failed: {message}")]
    QueryExecution {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error("Metadata query failed: {message} (object: {object})")]
    Metadata { message: String, object: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Coarse error classification, stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Connection,
    Validation,
    QueryExecution,
    Metadata,
    Internal,
}

impl DbError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a query execution error with optional SQL state.
    pub fn query_execution(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a metadata error for the given catalog object.
    pub fn metadata(message: impl Into<String>, object: impl Into<String>) -> Self {
        Self::Metadata {
            message: message.into(),
            object: object.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::QueryExecution { .. } => ErrorKind::QueryExecution,
            Self::Metadata { .. } => ErrorKind::Metadata,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Config { .. } => {
                Some("Check JDBC_URL, JDBC_DRIVER, JDBC_DRIVER_PATH, DB_USERNAME and DB_PASSWORD")
            }
            Self::Validation { .. } => Some("Submit a single SELECT statement"),
            Self::QueryExecution { .. } => Some("Check the SQL syntax and referenced objects"),
            Self::Metadata { .. } => Some("Verify the schema and table names with get_tables"),
            Self::Internal { .. } => None,
        }
    }

    /// SQLSTATE reported by the backend, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::QueryExecution { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }
}

/// Split a sqlx error into a human-readable message and the backend SQLSTATE.
///
/// Callers decide which [`DbError`] kind the failure belongs to; the same
/// sqlx error means different things during connect, execute or introspect.
pub fn describe_sqlx_error(err: &sqlx::Error) -> (String, Option<String>) {
    match err {
        sqlx::Error::Database(db_err) => (
            db_err.message().to_string(),
            db_err.code().map(|c| c.to_string()),
        ),
        sqlx::Error::Configuration(msg) => (format!("invalid configuration: {}", msg), None),
        sqlx::Error::Io(io_err) => (format!("I/O error: {}", io_err), None),
        sqlx::Error::Tls(tls_err) => (format!("TLS error: {}", tls_err), None),
        sqlx::Error::Protocol(msg) => (format!("protocol error: {}", msg), None),
        sqlx::Error::ColumnDecode { index, source } => (
            format!("failed to decode column {}: {}", index, source),
            None,
        ),
        sqlx::Error::Decode(source) => (format!("decode error: {}", source), None),
        sqlx::Error::WorkerCrashed => ("database worker crashed".to_string(), None),
        other => (other.to_string(), None),
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::connection("Failed to connect", "Check credentials");
        assert!(err.to_string().contains("Connection failed"));

        let err = DbError::validation("only SELECT allowed");
        assert_eq!(err.to_string(), "Validation error: only SELECT allowed");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(DbError::config("x").kind(), ErrorKind::Config);
        assert_eq!(DbError::connection("x", "y").kind(), ErrorKind::Connection);
        assert_eq!(DbError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            DbError::query_execution("x", None).kind(),
            ErrorKind::QueryExecution
        );
        assert_eq!(DbError::metadata("x", "t").kind(), ErrorKind::Metadata);
        assert_eq!(DbError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_suggestion() {
        let err = DbError::connection("refused", "Check that the server is running");
        assert_eq!(err.suggestion(), Some("Check that the server is running"));
        assert!(DbError::internal("x").suggestion().is_none());
    }

    #[test]
    fn test_sql_state() {
        let err = DbError::query_execution("syntax error", Some("42601".to_string()));
        assert_eq!(err.sql_state(), Some("42601"));
        assert_eq!(DbError::validation("x").sql_state(), None);
    }

    #[test]
    fn test_describe_sqlx_error() {
        let (message, code) = describe_sqlx_error(&sqlx::Error::WorkerCrashed);
        assert_eq!(message, "database worker crashed");
        assert!(code.is_none());

        let (message, _) = describe_sqlx_error(&sqlx::Error::Protocol("bad packet".into()));
        assert!(message.contains("bad packet"));
    }
}
