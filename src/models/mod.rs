//! Data models for the DB Gateway MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use connection::{DatabaseType, DriverConfig, DriverConfigError};
pub use query::{
    DEFAULT_MAX_ROWS, DEFAULT_QUERY_TIMEOUT_SECS, MAX_ROWS, QueryRequest, QueryResult,
    clamp_max_rows,
};
pub use schema::{
    ColumnDescriptor, ForeignKeyDescriptor, SchemaDescriptor, TABLE_TYPE_TABLE, TableDescriptor,
};
