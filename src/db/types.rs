//! Database-agnostic value mappings.
//!
//! This module converts backend row values into JSON so that every result
//! cell becomes one JSON value in column order.
//!
//! # Architecture
//!
//! Type conversion uses a two-phase approach:
//! 1. `TypeCategory` classifies column types into logical categories
//! 2. Database-specific decoders handle the actual value extraction
//!
//! Representation rules shared by all backends:
//! - NULL is `null`; integers, finite floats and booleans are JSON scalars
//! - DECIMAL/NUMERIC are exact decimal strings
//! - temporal values are ISO-8601 strings
//! - binary values are standard base64 strings
//! - anything the decoder cannot represent becomes `"<unsupported TYPE>"`

use crate::models::DatabaseType;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::MySqlRow;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row, TypeInfo, ValueRef};

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for database column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Text,
    Binary,
    Json,
    Uuid,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Unknown,
}

/// Classify a database type name into a logical category.
pub fn categorize_type(type_name: &str, db: DatabaseType) -> TypeCategory {
    let lower = type_name.to_lowercase();
    if lower.ends_with("[]") {
        return TypeCategory::Unknown;
    }
    // "INT UNSIGNED", "VARCHAR(255)"
    let base = lower
        .split(|c: char| c == '(' || c == ' ')
        .next()
        .unwrap_or_default();

    match base {
        "decimal" | "numeric" | "money" if db == DatabaseType::SQLite => TypeCategory::Float,
        "decimal" | "numeric" => TypeCategory::Decimal,
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "int2" | "int4"
        | "int8" | "serial" | "bigserial" | "smallserial" | "year" => TypeCategory::Integer,
        "bool" | "boolean" => TypeCategory::Boolean,
        "float" | "float4" | "float8" | "double" | "real" => TypeCategory::Float,
        "json" | "jsonb" => TypeCategory::Json,
        "uuid" => TypeCategory::Uuid,
        "bytea" | "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
            TypeCategory::Binary
        }
        "date" => TypeCategory::Date,
        "time" => TypeCategory::Time,
        "timestamptz" => TypeCategory::TimestampTz,
        // MySQL TIMESTAMP is stored in UTC; DATETIME carries no zone
        "timestamp" if db == DatabaseType::MySQL => TypeCategory::TimestampTz,
        "timestamp" | "datetime" => TypeCategory::Timestamp,
        "text" | "varchar" | "char" | "bpchar" | "name" | "citext" | "tinytext"
        | "mediumtext" | "longtext" | "enum" | "set" | "character" => TypeCategory::Text,
        _ => TypeCategory::Unknown,
    }
}

// =============================================================================
// Value Encoding
// =============================================================================

/// Encode binary data as a standard base64 JSON string.
pub fn encode_binary(bytes: &[u8]) -> JsonValue {
    JsonValue::String(STANDARD.encode(bytes))
}

/// Finite floats become numbers; NaN and infinities become strings.
pub fn encode_float(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}

pub fn encode_date(v: NaiveDate) -> JsonValue {
    JsonValue::String(v.format("%Y-%m-%d").to_string())
}

pub fn encode_time(v: NaiveTime) -> JsonValue {
    JsonValue::String(v.format("%H:%M:%S%.f").to_string())
}

pub fn encode_timestamp(v: NaiveDateTime) -> JsonValue {
    JsonValue::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

pub fn encode_timestamptz(v: DateTime<Utc>) -> JsonValue {
    JsonValue::String(v.to_rfc3339())
}

pub fn encode_decimal(v: BigDecimal) -> JsonValue {
    JsonValue::String(v.to_string())
}

/// Placeholder for values that have no JSON representation here.
pub fn unsupported(type_name: &str) -> JsonValue {
    JsonValue::String(format!("<unsupported {}>", type_name))
}

// =============================================================================
// Row to JSON Trait
// =============================================================================

/// Trait for converting database rows to positional JSON values.
pub trait RowToJson {
    /// One value per column, in column order.
    fn to_json_values(&self) -> Vec<JsonValue>;
}

impl RowToJson for MySqlRow {
    fn to_json_values(&self) -> Vec<JsonValue> {
        (0..self.columns().len())
            .map(|idx| mysql::decode_column(self, idx))
            .collect()
    }
}

impl RowToJson for PgRow {
    fn to_json_values(&self) -> Vec<JsonValue> {
        (0..self.columns().len())
            .map(|idx| postgres::decode_column(self, idx))
            .collect()
    }
}

impl RowToJson for SqliteRow {
    fn to_json_values(&self) -> Vec<JsonValue> {
        (0..self.columns().len())
            .map(|idx| sqlite::decode_column(self, idx))
            .collect()
    }
}

/// Check whether the raw value at `idx` is SQL NULL.
fn is_null<R: Row>(row: &R, idx: usize) -> bool
where
    usize: sqlx::ColumnIndex<R>,
{
    row.try_get_raw(idx).map(|v| v.is_null()).unwrap_or(false)
}

// =============================================================================
// Database-Specific Decoders
// =============================================================================
//
// Each decoder returns `None` when the value is not compatible with the Rust
// type tried, so callers can fall through to the next candidate.

mod mysql {
    use super::*;

    pub fn decode_column(row: &MySqlRow, idx: usize) -> JsonValue {
        if is_null(row, idx) {
            return JsonValue::Null;
        }
        let type_name = row.column(idx).type_info().name();
        let value = match categorize_type(type_name, DatabaseType::MySQL) {
            TypeCategory::Decimal => get(row, idx, encode_decimal),
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => get(row, idx, JsonValue::Bool),
            TypeCategory::Float => decode_float(row, idx),
            TypeCategory::Binary => get(row, idx, |v: Vec<u8>| encode_binary(&v)),
            TypeCategory::Json => get(row, idx, |v: JsonValue| v),
            TypeCategory::Date => get(row, idx, encode_date),
            TypeCategory::Time => get(row, idx, encode_time),
            TypeCategory::Timestamp => get(row, idx, encode_timestamp),
            TypeCategory::TimestampTz => get(row, idx, encode_timestamptz),
            _ => None,
        };
        value
            .or_else(|| get(row, idx, JsonValue::String))
            .unwrap_or_else(|| unsupported(type_name))
    }

    fn get<'r, T, F>(row: &'r MySqlRow, idx: usize, encode: F) -> Option<JsonValue>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
        F: FnOnce(T) -> JsonValue,
    {
        row.try_get::<T, _>(idx).ok().map(encode)
    }

    fn decode_integer(row: &MySqlRow, idx: usize) -> Option<JsonValue> {
        get(row, idx, |v: i64| JsonValue::Number(v.into()))
            .or_else(|| get(row, idx, |v: u64| JsonValue::Number(v.into())))
    }

    fn decode_float(row: &MySqlRow, idx: usize) -> Option<JsonValue> {
        get(row, idx, encode_float).or_else(|| get(row, idx, |v: f32| encode_float(v as f64)))
    }
}

mod postgres {
    use super::*;

    pub fn decode_column(row: &PgRow, idx: usize) -> JsonValue {
        if is_null(row, idx) {
            return JsonValue::Null;
        }
        let type_name = row.column(idx).type_info().name();
        let value = match categorize_type(type_name, DatabaseType::PostgreSQL) {
            TypeCategory::Decimal => get(row, idx, encode_decimal),
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => get(row, idx, JsonValue::Bool),
            TypeCategory::Float => decode_float(row, idx),
            TypeCategory::Binary => get(row, idx, |v: Vec<u8>| encode_binary(&v)),
            TypeCategory::Json => get(row, idx, |v: JsonValue| v),
            TypeCategory::Uuid => get(row, idx, |v: uuid::Uuid| JsonValue::String(v.to_string())),
            TypeCategory::Date => get(row, idx, encode_date),
            TypeCategory::Time => get(row, idx, encode_time),
            TypeCategory::Timestamp => get(row, idx, encode_timestamp),
            TypeCategory::TimestampTz => get(row, idx, encode_timestamptz),
            _ => None,
        };
        value
            .or_else(|| get(row, idx, JsonValue::String))
            .unwrap_or_else(|| unsupported(type_name))
    }

    fn get<'r, T, F>(row: &'r PgRow, idx: usize, encode: F) -> Option<JsonValue>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
        F: FnOnce(T) -> JsonValue,
    {
        row.try_get::<T, _>(idx).ok().map(encode)
    }

    fn decode_integer(row: &PgRow, idx: usize) -> Option<JsonValue> {
        get(row, idx, |v: i16| JsonValue::Number(v.into()))
            .or_else(|| get(row, idx, |v: i32| JsonValue::Number(v.into())))
            .or_else(|| get(row, idx, |v: i64| JsonValue::Number(v.into())))
    }

    fn decode_float(row: &PgRow, idx: usize) -> Option<JsonValue> {
        get(row, idx, encode_float).or_else(|| get(row, idx, |v: f32| encode_float(v as f64)))
    }
}

mod sqlite {
    use super::*;

    /// SQLite values carry their own storage class, so the declared type only
    /// decides booleans; everything else follows the storage class.
    pub fn decode_column(row: &SqliteRow, idx: usize) -> JsonValue {
        if is_null(row, idx) {
            return JsonValue::Null;
        }
        let type_name = row.column(idx).type_info().name();
        let category = categorize_type(type_name, DatabaseType::SQLite);

        if category == TypeCategory::Boolean {
            if let Some(v) = get(row, idx, JsonValue::Bool) {
                return v;
            }
        }

        get(row, idx, |v: i64| JsonValue::Number(v.into()))
            .or_else(|| get(row, idx, encode_float))
            .or_else(|| get(row, idx, |v: String| decode_text(v, category)))
            .or_else(|| get(row, idx, |v: Vec<u8>| encode_binary(&v)))
            .unwrap_or_else(|| unsupported(type_name))
    }

    fn get<'r, T, F>(row: &'r SqliteRow, idx: usize, encode: F) -> Option<JsonValue>
    where
        T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
        F: FnOnce(T) -> JsonValue,
    {
        row.try_get::<T, _>(idx).ok().map(encode)
    }

    fn decode_text(v: String, category: TypeCategory) -> JsonValue {
        if category == TypeCategory::Json {
            if let Ok(json) = serde_json::from_str::<JsonValue>(&v) {
                return json;
            }
        }
        JsonValue::String(v)
    }
}
