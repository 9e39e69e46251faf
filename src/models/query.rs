//! Query-related data models.
//!
//! This module defines types for bounded SELECT requests and their results.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Default row limit for query results.
pub const DEFAULT_MAX_ROWS: u32 = 100;

/// Maximum allowed row limit.
pub const MAX_ROWS: u32 = 1000;

/// Default per-invocation timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// A validated SELECT statement with its row bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub statement: String,
    /// Always within `1..=MAX_ROWS`
    pub max_rows: u32,
}

impl QueryRequest {
    /// Create a request, clamping `max_rows` into the allowed range.
    pub fn new(statement: impl Into<String>, max_rows: u32) -> Self {
        Self {
            statement: statement.into(),
            max_rows: clamp_max_rows(i64::from(max_rows)),
        }
    }
}

/// Clamp a caller-supplied row bound into `1..=MAX_ROWS`.
pub fn clamp_max_rows(requested: i64) -> u32 {
    // The clamp keeps the value inside u32 range
    requested.clamp(1, i64::from(MAX_ROWS)) as u32
}

/// Result of a bounded query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names in backend order
    pub columns: Vec<String>,
    /// Each row has one value per column, in column order
    pub rows: Vec<Vec<JsonValue>>,
    pub row_count: usize,
    /// True if at least one further row existed beyond `max_rows`
    pub has_more: bool,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<JsonValue>>, has_more: bool) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            has_more,
        }
    }
}
