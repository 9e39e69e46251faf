//! Schema-related data models.
//!
//! These mirror what a driver's catalog metadata API reports, so the field
//! names follow catalog conventions (`type`, `remarks`) rather than SQL ones.

use serde::{Deserialize, Serialize};

/// Catalog type name of a regular user table.
pub const TABLE_TYPE_TABLE: &str = "TABLE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub table_name: String,
    pub schema: Option<String>,
    /// Catalog table type: `TABLE`, `VIEW`, `SYSTEM TABLE`, ...
    #[serde(rename = "type")]
    pub table_type: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Backend type name as reported by the catalog
    #[serde(rename = "type")]
    pub data_type: String,
    /// Length, precision or display size, when the type has one
    pub size: Option<i64>,
    pub nullable: bool,
    pub default: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// None when the backend does not name the constraint (SQLite)
    pub fk_name: Option<String>,
    pub fk_column: String,
    pub pk_table: String,
    /// None when the reference targets the implicit primary key
    pub pk_column: Option<String>,
}

/// Columns and keys of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub table_name: String,
    pub schema: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key column names in key order
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
}
