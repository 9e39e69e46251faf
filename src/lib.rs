//! DB Gateway MCP Server Library
//!
//! This library provides a read-only gateway to one SQL database (SQLite,
//! PostgreSQL, MySQL/MariaDB) for AI assistants speaking MCP (Model Context
//! Protocol): bounded SELECT execution and catalog introspection.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use db::DbClient;
pub use error::{DbError, DbResult};
pub use mcp::GatewayService;
pub use models::DriverConfig;
