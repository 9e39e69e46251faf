//! Schema introspection tools.
//!
//! This module implements the `get_tables` and `get_columns` MCP tools.

use crate::db::DbClient;
use crate::error::{DbError, DbResult};
use crate::models::{DriverConfig, SchemaDescriptor, TableDescriptor};
use crate::tools::{log_outcome, timed_out};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Input for the get_tables tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTablesInput {
    /// Schema to list. Defaults to the connection's default schema.
    #[serde(default)]
    pub schema: Option<String>,
    /// Include system tables, views and other non-table entries. Default: false
    #[serde(default)]
    pub include_system: bool,
}

/// Output from the get_tables tool.
#[derive(Debug, Clone, Serialize)]
pub struct GetTablesOutput {
    /// Tables in catalog order
    pub tables: Vec<TableDescriptor>,
    /// Number of tables returned
    pub count: usize,
}

impl From<Vec<TableDescriptor>> for GetTablesOutput {
    fn from(tables: Vec<TableDescriptor>) -> Self {
        let count = tables.len();
        Self { tables, count }
    }
}

/// Input for the get_columns tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetColumnsInput {
    /// Table to describe
    pub table_name: String,
    /// Schema containing the table. Defaults to the connection's default schema.
    #[serde(default)]
    pub schema: Option<String>,
}

/// Handler for schema operations.
pub struct SchemaToolHandler {
    config: Arc<DriverConfig>,
    timeout: Duration,
}

impl SchemaToolHandler {
    pub fn new(config: Arc<DriverConfig>, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    /// Handle the get_tables tool call.
    pub async fn get_tables(&self, input: GetTablesInput) -> DbResult<GetTablesOutput> {
        let start = Instant::now();

        let result = async {
            let mut client = DbClient::new(DriverConfig::clone(&self.config))?;
            let outcome = tokio::time::timeout(
                self.timeout,
                client.list_tables(input.schema.as_deref(), input.include_system),
            )
            .await;
            match outcome {
                Ok(tables) => {
                    client.close().await;
                    tables.map(GetTablesOutput::from)
                }
                Err(_) => {
                    client.abort();
                    Err(DbError::metadata(
                        timed_out(self.timeout),
                        input.schema.as_deref().unwrap_or("<default schema>"),
                    ))
                }
            }
        }
        .await;

        log_outcome("get_tables", &result, start);
        result
    }

    /// Handle the get_columns tool call.
    pub async fn get_columns(&self, input: GetColumnsInput) -> DbResult<SchemaDescriptor> {
        let start = Instant::now();

        let result = async {
            let mut client = DbClient::new(DriverConfig::clone(&self.config))?;
            let outcome = tokio::time::timeout(
                self.timeout,
                client.describe_table(&input.table_name, input.schema.as_deref()),
            )
            .await;
            match outcome {
                Ok(descriptor) => {
                    client.close().await;
                    descriptor
                }
                Err(_) => {
                    client.abort();
                    Err(DbError::metadata(timed_out(self.timeout), input.table_name.trim()))
                }
            }
        }
        .await;

        log_outcome("get_columns", &result, start);
        result
    }
}
