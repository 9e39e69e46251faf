//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection lifecycle management
//! - Read-only statement validation
//! - Bounded query execution
//! - Catalog access and schema introspection
//! - Type mappings

pub mod catalog;
pub mod client;
pub mod connection;
pub mod executor;
pub mod introspector;
pub mod sql_validator;
pub mod types;

pub use catalog::CatalogProvider;
pub use client::DbClient;
pub use connection::{ConnectionManager, DbConnection};
pub use executor::QueryExecutor;
pub use introspector::SchemaIntrospector;
pub use sql_validator::{validate_select, validate_table_name};
