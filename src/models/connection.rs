//! Connection-related data models.
//!
//! This module defines the driver configuration that every client is built
//! from, and the backend detection derived from it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

const MASK: &str = "****";

/// Shortest password that is masked wherever it appears, quoted or not.
const MIN_BARE_SECRET_LEN: usize = 4;

/// Supported database types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    PostgreSQL,
    /// Includes MariaDB
    MySQL,
    SQLite,
}

impl DatabaseType {
    /// Parse database type from a connection string.
    ///
    /// Accepts native URLs (`postgres://`, `mysql://`, `sqlite:`) as well as
    /// their `jdbc:`-prefixed forms.
    pub fn from_connection_string(connection_string: &str) -> Option<Self> {
        let lower = strip_jdbc_prefix(connection_string.trim()).to_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if lower.starts_with("mysql://") || lower.starts_with("mariadb://") {
            Some(Self::MySQL)
        } else if lower.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    /// Resolve a driver identifier to the backend it drives.
    ///
    /// Both short names (`postgres`, `mysql`, `sqlite`) and the conventional
    /// vendor driver class names are recognized, case-insensitively.
    pub fn from_driver_class(driver_class: &str) -> Option<Self> {
        match driver_class.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pgsql" | "org.postgresql.driver" => Some(Self::PostgreSQL),
            "mysql" | "mariadb" | "com.mysql.cj.jdbc.driver" | "com.mysql.jdbc.driver"
            | "org.mariadb.jdbc.driver" => Some(Self::MySQL),
            "sqlite" | "sqlite3" | "org.sqlite.jdbc" => Some(Self::SQLite),
            _ => None,
        }
    }

    /// Get the display name for this database type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Everything needed to reach one database through its vendor driver.
///
/// Immutable after construction. Built once from configuration and handed to
/// every client by value.
#[derive(Clone, Serialize)]
pub struct DriverConfig {
    /// Contains sensitive data - never log, use [`Self::masked_connection_string`]
    #[serde(skip_serializing)]
    pub connection_string: String,
    pub driver_class: String,
    pub driver_artifact_path: PathBuf,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl DriverConfig {
    pub fn new(
        connection_string: impl Into<String>,
        driver_class: impl Into<String>,
        driver_artifact_path: impl Into<PathBuf>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            driver_class: driver_class.into(),
            driver_artifact_path: driver_artifact_path.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check every field and resolve the backend.
    ///
    /// Performs no network I/O. The only filesystem access is opening the
    /// driver artifact to confirm it is readable.
    pub fn validate(&self) -> Result<DatabaseType, DriverConfigError> {
        require("connection_string", &self.connection_string)?;
        require("driver_class", &self.driver_class)?;
        require(
            "driver_artifact_path",
            &self.driver_artifact_path.to_string_lossy(),
        )?;
        require("username", &self.username)?;
        require("password", &self.password)?;

        self.check_driver_artifact()?;

        let driver = DatabaseType::from_driver_class(&self.driver_class)
            .ok_or_else(|| DriverConfigError::UnknownDriver(self.driver_class.trim().to_string()))?;
        let backend = DatabaseType::from_connection_string(&self.connection_string).ok_or_else(
            || DriverConfigError::UnsupportedConnectionString(self.masked_connection_string()),
        )?;

        if driver != backend {
            return Err(DriverConfigError::DriverMismatch {
                driver: self.driver_class.trim().to_string(),
                backend,
            });
        }

        Ok(backend)
    }

    fn check_driver_artifact(&self) -> Result<(), DriverConfigError> {
        let path = &self.driver_artifact_path;
        let metadata = std::fs::metadata(path)
            .map_err(|_| DriverConfigError::DriverArtifactNotFound(path.clone()))?;
        if !metadata.is_file() {
            return Err(DriverConfigError::DriverArtifactNotAFile(path.clone()));
        }
        File::open(path).map_err(|e| DriverConfigError::DriverArtifactUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Connection string in the form the native driver expects.
    ///
    /// Strips a `jdbc:` prefix and maps `mariadb://` onto the MySQL driver.
    pub fn normalized_connection_string(&self) -> String {
        let stripped = strip_jdbc_prefix(self.connection_string.trim());
        match stripped.get(..10) {
            Some(prefix) if prefix.eq_ignore_ascii_case("mariadb://") => {
                format!("mysql://{}", &stripped[10..])
            }
            _ => stripped.to_string(),
        }
    }

    /// Get a display-safe version of the connection string (credentials masked).
    pub fn masked_connection_string(&self) -> String {
        let raw = self.connection_string.trim();
        let masked = match url::Url::parse(strip_jdbc_prefix(raw)) {
            Ok(mut parsed) if parsed.password().is_some() => {
                // set_password only fails for cannot-be-a-base URLs, which carry no password
                let _ = parsed.set_password(Some(MASK));
                let prefix_len = raw.len() - strip_jdbc_prefix(raw).len();
                format!("{}{}", &raw[..prefix_len], parsed)
            }
            _ => raw.to_string(),
        };
        self.redact(&masked)
    }

    /// Mask configured credentials in a backend diagnostic.
    ///
    /// Quoted occurrences of the username or password are always masked
    /// (`for user "reader"`, `'reader'@'host'`). A bare password is masked
    /// only when it is at least four characters long; shorter ones would
    /// mangle the rest of the message.
    pub fn redact(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for secret in [self.password.trim(), self.username.trim()] {
            if secret.is_empty() {
                continue;
            }
            for quote in ['"', '\'', '`'] {
                redacted = redacted.replace(
                    &format!("{quote}{secret}{quote}"),
                    &format!("{quote}{MASK}{quote}"),
                );
            }
        }
        let password = self.password.trim();
        if password.chars().count() >= MIN_BARE_SECRET_LEN {
            redacted = redacted.replace(password, MASK);
        }
        redacted
    }
}

impl fmt::Debug for DriverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverConfig")
            .field("connection_string", &self.masked_connection_string())
            .field("driver_class", &self.driver_class)
            .field("driver_artifact_path", &self.driver_artifact_path)
            .field("username", &self.username)
            .field("password", &MASK)
            .finish()
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DriverConfigError> {
    if value.trim().is_empty() {
        Err(DriverConfigError::MissingField(field))
    } else {
        Ok(())
    }
}

fn strip_jdbc_prefix(connection_string: &str) -> &str {
    match connection_string.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("jdbc:") => &connection_string[5..],
        _ => connection_string,
    }
}

/// Errors that can occur when validating a driver configuration.
#[derive(Debug, thiserror::Error)]
pub enum DriverConfigError {
    #[error("{0} is required but empty")]
    MissingField(&'static str),

    #[error("driver artifact not found: {}", .0.display())]
    DriverArtifactNotFound(PathBuf),

    #[error("driver artifact is not a regular file: {}", .0.display())]
    DriverArtifactNotAFile(PathBuf),

    #[error("driver artifact is not readable: {} ({reason})", .path.display())]
    DriverArtifactUnreadable { path: PathBuf, reason: String },

    #[error("unknown driver class: {0}")]
    UnknownDriver(String),

    /// Could not determine database type from connection string
    #[error("unsupported connection string: {0}")]
    UnsupportedConnectionString(String),

    #[error("driver '{driver}' cannot open a {backend} connection string")]
    DriverMismatch {
        driver: String,
        backend: DatabaseType,
    },
}

impl From<DriverConfigError> for crate::error::DbError {
    fn from(err: DriverConfigError) -> Self {
        crate::error::DbError::config(err.to_string())
    }
}
