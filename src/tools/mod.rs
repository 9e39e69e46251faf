//! MCP tool implementations.
//!
//! This module contains all database tool handlers:
//! - `query`: Execute bounded SELECT queries
//! - `schema`: List tables and describe a table's columns and keys
//!
//! Every call builds its own client, runs one operation under the configured
//! timeout and releases the connection before returning.

pub mod query;
pub mod schema;

pub use query::{ExecuteQueryInput, QueryToolHandler};
pub use schema::{GetColumnsInput, GetTablesInput, GetTablesOutput, SchemaToolHandler};

use crate::error::DbResult;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Message reported when an operation exceeds its time limit.
pub(crate) fn timed_out(timeout: Duration) -> String {
    format!("operation timed out after {}s", timeout.as_secs_f64())
}

/// Log the end of a tool call.
///
/// Suggestions and the backend SQLSTATE are logged here only; the error
/// record returned to the caller carries just the message.
pub(crate) fn log_outcome<T>(tool: &'static str, result: &DbResult<T>, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(_) => info!(tool = tool, elapsed_ms = elapsed_ms, "Tool call succeeded"),
        Err(e) => warn!(
            tool = tool,
            elapsed_ms = elapsed_ms,
            kind = ?e.kind(),
            error = %e,
            sql_state = e.sql_state(),
            suggestion = e.suggestion().unwrap_or(""),
            "Tool call failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_out_message() {
        assert_eq!(timed_out(Duration::from_secs(30)), "operation timed out after 30s");
        assert_eq!(timed_out(Duration::from_millis(1500)), "operation timed out after 1.5s");
    }

    #[test]
    fn test_log_outcome_accepts_both_outcomes() {
        let start = Instant::now();
        log_outcome("execute_query", &Ok::<_, crate::error::DbError>(3), start);
        let failed: DbResult<()> = Err(crate::error::DbError::query_execution(
            "syntax error at or near \"FORM\"",
            Some("42601".to_string()),
        ));
        assert_eq!(failed.as_ref().unwrap_err().sql_state(), Some("42601"));
        log_outcome("execute_query", &failed, start);
    }
}
