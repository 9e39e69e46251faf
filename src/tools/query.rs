//! Query execution tool.
//!
//! This module implements the `execute_query` MCP tool. Only single SELECT
//! statements are accepted; everything else is rejected before a connection
//! is opened.

use crate::db::DbClient;
use crate::error::{DbError, DbResult};
use crate::models::{DEFAULT_MAX_ROWS, DriverConfig, QueryResult, clamp_max_rows};
use crate::tools::{log_outcome, timed_out};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Input for the execute_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteQueryInput {
    /// SQL SELECT statement to execute. Any other statement is rejected.
    pub query: String,
    /// Maximum rows to return. Default: 100, clamped to 1..=1000
    #[serde(default)]
    pub max_rows: Option<i64>,
}

impl ExecuteQueryInput {
    /// The effective row bound after defaulting and clamping.
    pub fn effective_max_rows(&self) -> u32 {
        self.max_rows
            .map(clamp_max_rows)
            .unwrap_or(DEFAULT_MAX_ROWS)
    }
}

/// Handler for query execution.
pub struct QueryToolHandler {
    config: Arc<DriverConfig>,
    timeout: Duration,
}

impl QueryToolHandler {
    pub fn new(config: Arc<DriverConfig>, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    /// Handle the execute_query tool call.
    ///
    /// A fresh client is built for the call and its connection is released
    /// on every exit path. When the timeout expires the connection is
    /// dropped without a close handshake.
    pub async fn execute_query(&self, input: ExecuteQueryInput) -> DbResult<QueryResult> {
        let start = Instant::now();
        let max_rows = input.effective_max_rows();

        let result = async {
            let mut client = DbClient::new(DriverConfig::clone(&self.config))?;
            let outcome =
                tokio::time::timeout(self.timeout, client.execute_query(&input.query, max_rows))
                    .await;
            match outcome {
                Ok(result) => {
                    client.close().await;
                    result
                }
                Err(_) => {
                    client.abort();
                    Err(DbError::query_execution(timed_out(self.timeout), None))
                }
            }
        }
        .await;

        log_outcome("execute_query", &result, start);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_query_input_deserialization() {
        let json = r#"{"query": "SELECT * FROM users", "max_rows": 25}"#;
        let input: ExecuteQueryInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.query, "SELECT * FROM users");
        assert_eq!(input.max_rows, Some(25));
        assert_eq!(input.effective_max_rows(), 25);
    }

    #[test]
    fn test_max_rows_defaults_and_clamps() {
        let input: ExecuteQueryInput = serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();
        assert_eq!(input.effective_max_rows(), 100);

        let input: ExecuteQueryInput =
            serde_json::from_str(r#"{"query": "SELECT 1", "max_rows": 50000}"#).unwrap();
        assert_eq!(input.effective_max_rows(), 1000);

        let input: ExecuteQueryInput =
            serde_json::from_str(r#"{"query": "SELECT 1", "max_rows": -3}"#).unwrap();
        assert_eq!(input.effective_max_rows(), 1);
    }

    #[test]
    fn test_invalid_config_reported_first() {
        let config = DriverConfig::new("sqlite:app.db", "sqlite", "", "u", "p");
        let handler = QueryToolHandler::new(Arc::new(config), Duration::from_secs(1));
        let err = tokio_test::block_on(handler.execute_query(ExecuteQueryInput {
            query: "DROP TABLE t".to_string(),
            max_rows: None,
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_missing_query_rejected() {
        assert!(serde_json::from_str::<ExecuteQueryInput>(r#"{"max_rows": 5}"#).is_err());
    }
}
