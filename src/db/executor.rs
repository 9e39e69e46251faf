//! Query execution engine.
//!
//! This module runs validated SELECT statements with a hard row bound:
//! - Column names come from the prepared statement, so they are known even
//!   when no row matches
//! - Rows are streamed and at most `max_rows + 1` are ever read; the extra row
//!   only decides `has_more` and is discarded
//! - Values are converted to JSON in column order
//!
//! # Architecture
//!
//! The executor uses database-specific implementations organized in submodules:
//! - `mysql`: MySQL-specific fetch
//! - `postgres`: PostgreSQL-specific fetch
//! - `sqlite`: SQLite-specific fetch
//!
//! Each submodule provides identical functionality adapted to the database's type system.

use crate::db::connection::DbConnection;
use crate::db::types::RowToJson;
use crate::error::{DbError, DbResult, describe_sqlx_error};
use crate::models::{QueryRequest, QueryResult};
use futures_util::TryStreamExt;
use serde_json::Value as JsonValue;
use sqlx::{Column, Executor, Statement};
use std::time::Instant;
use tracing::{debug, info};

/// Rows read from the backend: column names, the kept rows and whether more exist.
type BoundedRows = (Vec<String>, Vec<Vec<JsonValue>>, bool);

/// Query executor that handles database query execution.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute a SELECT query and return at most `request.max_rows` rows.
    ///
    /// The request's statement must already have passed validation. Backend
    /// failures are reported as query execution errors and never retried.
    pub async fn execute(
        &self,
        conn: &mut DbConnection,
        request: &QueryRequest,
    ) -> DbResult<QueryResult> {
        let start = Instant::now();
        let max_rows = request.max_rows as usize;

        debug!(
            sql = %request.statement,
            max_rows = max_rows,
            db_type = %conn.db_type(),
            "Executing query"
        );

        let fetched = match conn {
            DbConnection::MySql(c) => mysql::fetch_bounded(c, &request.statement, max_rows).await,
            DbConnection::Postgres(c) => {
                postgres::fetch_bounded(c, &request.statement, max_rows).await
            }
            DbConnection::SQLite(c) => sqlite::fetch_bounded(c, &request.statement, max_rows).await,
        };

        let (columns, rows, has_more) = fetched.map_err(|e| {
            let (message, sql_state) = describe_sqlx_error(&e);
            DbError::query_execution(message, sql_state)
        })?;

        let result = QueryResult::new(columns, rows, has_more);
        info!(
            row_count = result.row_count,
            has_more = result.has_more,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query completed"
        );
        Ok(result)
    }
}

// =============================================================================
// Common Helper Functions
// =============================================================================

fn column_names<C: Column>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|c| c.name().to_string()).collect()
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================
//
// Each module below provides the same interface adapted to its database type.
// The code structure is intentionally parallel to make differences obvious.

mod mysql {
    use super::*;
    use sqlx::MySqlConnection;

    pub async fn fetch_bounded(
        conn: &mut MySqlConnection,
        sql: &str,
        max_rows: usize,
    ) -> Result<BoundedRows, sqlx::Error> {
        let statement = (&mut *conn).prepare(sql).await?;
        let columns = column_names(statement.columns());

        let mut stream = statement.query().fetch(&mut *conn);
        let mut rows = Vec::new();
        let mut has_more = false;
        while let Some(row) = stream.try_next().await? {
            if rows.len() == max_rows {
                has_more = true;
                break;
            }
            rows.push(row.to_json_values());
        }
        Ok((columns, rows, has_more))
    }
}

mod postgres {
    use super::*;
    use sqlx::PgConnection;

    pub async fn fetch_bounded(
        conn: &mut PgConnection,
        sql: &str,
        max_rows: usize,
    ) -> Result<BoundedRows, sqlx::Error> {
        let statement = (&mut *conn).prepare(sql).await?;
        let columns = column_names(statement.columns());

        let mut stream = statement.query().fetch(&mut *conn);
        let mut rows = Vec::new();
        let mut has_more = false;
        while let Some(row) = stream.try_next().await? {
            if rows.len() == max_rows {
                has_more = true;
                break;
            }
            rows.push(row.to_json_values());
        }
        Ok((columns, rows, has_more))
    }
}

mod sqlite {
    use super::*;
    use sqlx::SqliteConnection;

    pub async fn fetch_bounded(
        conn: &mut SqliteConnection,
        sql: &str,
        max_rows: usize,
    ) -> Result<BoundedRows, sqlx::Error> {
        let statement = (&mut *conn).prepare(sql).await?;
        let columns = column_names(statement.columns());

        let mut stream = statement.query().fetch(&mut *conn);
        let mut rows = Vec::new();
        let mut has_more = false;
        while let Some(row) = stream.try_next().await? {
            if rows.len() == max_rows {
                has_more = true;
                break;
            }
            rows.push(row.to_json_values());
        }
        Ok((columns, rows, has_more))
    }
}
