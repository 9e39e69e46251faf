//! The per-invocation gateway client.
//!
//! A [`DbClient`] composes the connection manager, validator, executor and
//! introspector. It is built for exactly one operation and then closed;
//! nothing is shared between clients.

use crate::db::connection::ConnectionManager;
use crate::db::executor::QueryExecutor;
use crate::db::introspector::SchemaIntrospector;
use crate::db::sql_validator::{validate_select, validate_table_name};
use crate::error::DbResult;
use crate::models::{DriverConfig, QueryRequest, QueryResult, SchemaDescriptor, TableDescriptor};

#[derive(Debug)]
pub struct DbClient {
    connections: ConnectionManager,
    executor: QueryExecutor,
}

impl DbClient {
    /// Build a client. The configuration is validated here and no connection
    /// is opened until an operation needs one.
    pub fn new(config: DriverConfig) -> DbResult<Self> {
        Ok(Self {
            connections: ConnectionManager::new(config)?,
            executor: QueryExecutor::new(),
        })
    }

    /// Run a read-only query. Validation happens before any connection attempt.
    pub async fn execute_query(&mut self, statement: &str, max_rows: u32) -> DbResult<QueryResult> {
        let statement = validate_select(statement)?;
        let request = QueryRequest::new(statement, max_rows);
        let conn = self.connections.connection().await?;
        self.executor.execute(conn, &request).await
    }

    pub async fn list_tables(
        &mut self,
        schema: Option<&str>,
        include_system: bool,
    ) -> DbResult<Vec<TableDescriptor>> {
        let conn = self.connections.connection().await?;
        SchemaIntrospector::new(conn)
            .list_tables(schema, include_system)
            .await
    }

    pub async fn describe_table(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> DbResult<SchemaDescriptor> {
        let table_name = validate_table_name(table_name)?;
        let conn = self.connections.connection().await?;
        SchemaIntrospector::new(conn)
            .describe_table(table_name, schema)
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.connections.is_connected()
    }

    /// Release the connection. Idempotent and infallible.
    pub async fn close(&mut self) {
        self.connections.close().await;
    }

    /// Drop the connection without a close handshake.
    pub fn abort(&mut self) {
        self.connections.abort();
    }
}
