//! Catalog metadata access.
//!
//! [`CatalogProvider`] is the metadata interface a driver exposes: tables,
//! columns, primary keys and imported foreign keys of one table. It is
//! implemented for each sqlx backend connection by querying that backend's
//! system catalogs, and for [`DbConnection`] by dispatch.
//!
//! # Architecture
//!
//! SQL queries are organized in the `queries` submodule with constants for each
//! database type. Database-specific implementations are in their respective
//! submodules (postgres, mysql, sqlite), each providing the same interface.
//!
//! A table the catalog does not know yields empty results rather than an
//! error; only failing catalog queries are reported as metadata errors.

use crate::db::connection::DbConnection;
use crate::error::{DbError, DbResult, describe_sqlx_error};
use crate::models::{ColumnDescriptor, ForeignKeyDescriptor, TableDescriptor};
use std::future::Future;
use tracing::debug;

/// Driver-level metadata operations.
///
/// `schema: None` means the connection's default schema. `table_types: None`
/// returns every table type the catalog reports.
pub trait CatalogProvider: Send {
    fn list_tables(
        &mut self,
        schema: Option<&str>,
        table_types: Option<&[&str]>,
    ) -> impl Future<Output = DbResult<Vec<TableDescriptor>>> + Send;

    fn list_columns(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> impl Future<Output = DbResult<Vec<ColumnDescriptor>>> + Send;

    /// Primary key column names in key order.
    fn list_primary_keys(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> impl Future<Output = DbResult<Vec<String>>> + Send;

    /// Foreign keys declared on `table_name` (the imported keys).
    fn list_foreign_keys(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> impl Future<Output = DbResult<Vec<ForeignKeyDescriptor>>> + Send;
}

impl CatalogProvider for DbConnection {
    async fn list_tables(
        &mut self,
        schema: Option<&str>,
        table_types: Option<&[&str]>,
    ) -> DbResult<Vec<TableDescriptor>> {
        match self {
            DbConnection::Postgres(c) => c.list_tables(schema, table_types).await,
            DbConnection::MySql(c) => c.list_tables(schema, table_types).await,
            DbConnection::SQLite(c) => c.list_tables(schema, table_types).await,
        }
    }

    async fn list_columns(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> DbResult<Vec<ColumnDescriptor>> {
        match self {
            DbConnection::Postgres(c) => c.list_columns(table_name, schema).await,
            DbConnection::MySql(c) => c.list_columns(table_name, schema).await,
            DbConnection::SQLite(c) => c.list_columns(table_name, schema).await,
        }
    }

    async fn list_primary_keys(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> DbResult<Vec<String>> {
        match self {
            DbConnection::Postgres(c) => c.list_primary_keys(table_name, schema).await,
            DbConnection::MySql(c) => c.list_primary_keys(table_name, schema).await,
            DbConnection::SQLite(c) => c.list_primary_keys(table_name, schema).await,
        }
    }

    async fn list_foreign_keys(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> DbResult<Vec<ForeignKeyDescriptor>> {
        match self {
            DbConnection::Postgres(c) => c.list_foreign_keys(table_name, schema).await,
            DbConnection::MySql(c) => c.list_foreign_keys(table_name, schema).await,
            DbConnection::SQLite(c) => c.list_foreign_keys(table_name, schema).await,
        }
    }
}

// =============================================================================
// Common Helper Functions
// =============================================================================

fn metadata_error(error: sqlx::Error, object: &str) -> DbError {
    let (message, _) = describe_sqlx_error(&error);
    DbError::metadata(message, object)
}

/// Keep only the requested table types, preserving catalog order.
fn retain_types(tables: &mut Vec<TableDescriptor>, table_types: Option<&[&str]>) {
    if let Some(types) = table_types {
        tables.retain(|t| types.iter().any(|ty| t.table_type.eq_ignore_ascii_case(ty)));
    }
}

/// Treat empty remarks the same as missing ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Extract the leading size from a declared type such as `VARCHAR(255)` or
/// `DECIMAL(10,2)`.
pub fn declared_type_size(declared: &str) -> Option<i64> {
    let open = declared.find('(')?;
    let rest = &declared[open + 1..];
    let end = rest.find(|c: char| c == ',' || c == ')')?;
    rest[..end].trim().parse().ok()
}

// =============================================================================
// SQL Query Templates
// =============================================================================
//
// Centralized SQL queries for catalog access. Each database has its own
// submodule with queries adapted to its specific system catalogs. Table types
// are reported with the catalog names drivers conventionally use.

mod queries {
    pub mod postgres {
        pub const LIST_TABLES: &str = r#"
            SELECT
                c.relname::text AS table_name,
                n.nspname::text AS table_schema,
                CASE
                    WHEN n.nspname IN ('pg_catalog', 'information_schema')
                        OR n.nspname LIKE 'pg\_toast%' THEN
                        CASE c.relkind WHEN 'v' THEN 'SYSTEM VIEW' ELSE 'SYSTEM TABLE' END
                    WHEN n.nspname LIKE 'pg\_temp%' THEN 'TEMPORARY TABLE'
                    ELSE
                        CASE c.relkind
                            WHEN 'r' THEN 'TABLE'
                            WHEN 'p' THEN 'PARTITIONED TABLE'
                            WHEN 'v' THEN 'VIEW'
                            WHEN 'm' THEN 'MATERIALIZED VIEW'
                            WHEN 'f' THEN 'FOREIGN TABLE'
                        END
                END AS table_type,
                pg_catalog.obj_description(c.oid, 'pg_class') AS remarks
            FROM pg_catalog.pg_class c
            JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            WHERE c.relkind IN ('r', 'p', 'v', 'm', 'f')
            AND n.nspname::text = COALESCE($1::text, current_schema()::text)
            ORDER BY table_type, table_schema, table_name
            "#;

        pub const LIST_COLUMNS: &str = r#"
            SELECT
                c.column_name::text AS column_name,
                c.udt_name::text AS type_name,
                COALESCE(c.character_maximum_length, c.numeric_precision, c.datetime_precision)::int8
                    AS column_size,
                c.is_nullable::text = 'YES' AS nullable,
                c.column_default::text AS column_default,
                pg_catalog.col_description(a.attrelid, a.attnum) AS remarks
            FROM information_schema.columns c
            JOIN pg_catalog.pg_namespace n ON n.nspname = c.table_schema
            JOIN pg_catalog.pg_class t ON t.relnamespace = n.oid AND t.relname = c.table_name
            JOIN pg_catalog.pg_attribute a ON a.attrelid = t.oid AND a.attname = c.column_name
            WHERE c.table_name::text = $1
            AND c.table_schema::text = COALESCE($2::text, current_schema()::text)
            ORDER BY c.ordinal_position
            "#;

        pub const LIST_PRIMARY_KEYS: &str = r#"
            SELECT kcu.column_name::text AS column_name
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                ON tc.constraint_name = kcu.constraint_name
                AND tc.table_schema = kcu.table_schema
                AND tc.table_name = kcu.table_name
            WHERE tc.constraint_type = 'PRIMARY KEY'
            AND tc.table_name::text = $1
            AND tc.table_schema::text = COALESCE($2::text, current_schema()::text)
            ORDER BY kcu.ordinal_position
            "#;

        pub const LIST_FOREIGN_KEYS: &str = r#"
            SELECT
                con.conname::text AS fk_name,
                src.attname::text AS fk_column,
                ref_cls.relname::text AS pk_table,
                ref.attname::text AS pk_column
            FROM pg_catalog.pg_constraint con
            JOIN pg_catalog.pg_class cls ON cls.oid = con.conrelid
            JOIN pg_catalog.pg_namespace n ON n.oid = cls.relnamespace
            JOIN pg_catalog.pg_class ref_cls ON ref_cls.oid = con.confrelid
            CROSS JOIN LATERAL unnest(con.conkey, con.confkey)
                WITH ORDINALITY AS k(src_attnum, ref_attnum, position)
            JOIN pg_catalog.pg_attribute src
                ON src.attrelid = con.conrelid AND src.attnum = k.src_attnum
            JOIN pg_catalog.pg_attribute ref
                ON ref.attrelid = con.confrelid AND ref.attnum = k.ref_attnum
            WHERE con.contype = 'f'
            AND cls.relname::text = $1
            AND n.nspname::text = COALESCE($2::text, current_schema()::text)
            ORDER BY ref_cls.relname, con.conname, k.position
            "#;
    }

    pub mod mysql {
        pub const LIST_TABLES: &str = r#"
            SELECT
                CONVERT(TABLE_NAME USING utf8) AS TABLE_NAME,
                CONVERT(TABLE_SCHEMA USING utf8) AS TABLE_SCHEMA,
                CONVERT(
                    CASE
                        WHEN TABLE_SCHEMA IN ('mysql', 'information_schema', 'performance_schema', 'sys') THEN
                            CASE WHEN TABLE_TYPE = 'VIEW' THEN 'SYSTEM VIEW' ELSE 'SYSTEM TABLE' END
                        WHEN TABLE_TYPE = 'BASE TABLE' THEN 'TABLE'
                        ELSE TABLE_TYPE
                    END USING utf8) AS TABLE_KIND,
                CONVERT(TABLE_COMMENT USING utf8) AS REMARKS
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = COALESCE(?, DATABASE())
            ORDER BY TABLE_KIND, TABLE_SCHEMA, TABLE_NAME
            "#;

        pub const LIST_COLUMNS: &str = r#"
            SELECT
                CONVERT(COLUMN_NAME USING utf8) AS COLUMN_NAME,
                CONVERT(UPPER(DATA_TYPE) USING utf8) AS TYPE_NAME,
                CAST(COALESCE(CHARACTER_MAXIMUM_LENGTH, NUMERIC_PRECISION, DATETIME_PRECISION) AS SIGNED)
                    AS COLUMN_SIZE,
                CONVERT(IS_NULLABLE USING utf8) AS IS_NULLABLE,
                CONVERT(COLUMN_DEFAULT USING utf8) AS COLUMN_DEFAULT,
                CONVERT(COLUMN_COMMENT USING utf8) AS REMARKS
            FROM information_schema.COLUMNS
            WHERE TABLE_NAME = ? AND TABLE_SCHEMA = COALESCE(?, DATABASE())
            ORDER BY ORDINAL_POSITION
            "#;

        pub const LIST_PRIMARY_KEYS: &str = r#"
            SELECT CONVERT(COLUMN_NAME USING utf8) AS COLUMN_NAME
            FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_NAME = ?
            AND TABLE_SCHEMA = COALESCE(?, DATABASE())
            AND CONSTRAINT_NAME = 'PRIMARY'
            ORDER BY ORDINAL_POSITION
            "#;

        pub const LIST_FOREIGN_KEYS: &str = r#"
            SELECT
                CONVERT(CONSTRAINT_NAME USING utf8) AS FK_NAME,
                CONVERT(COLUMN_NAME USING utf8) AS FK_COLUMN,
                CONVERT(REFERENCED_TABLE_NAME USING utf8) AS PK_TABLE,
                CONVERT(REFERENCED_COLUMN_NAME USING utf8) AS PK_COLUMN
            FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_NAME = ?
            AND TABLE_SCHEMA = COALESCE(?, DATABASE())
            AND REFERENCED_TABLE_NAME IS NOT NULL
            ORDER BY REFERENCED_TABLE_NAME, CONSTRAINT_NAME, ORDINAL_POSITION
            "#;
    }

    pub mod sqlite {
        pub const SCHEMA_EXISTS: &str =
            "SELECT name FROM pragma_database_list WHERE name = ?1 COLLATE NOCASE";

        /// `{schema}` is replaced with a quoted, verified schema name.
        pub const LIST_TABLES_TEMPLATE: &str = r#"
            SELECT
                name AS table_name,
                CASE
                    WHEN name LIKE 'sqlite\_%' ESCAPE '\' THEN 'SYSTEM TABLE'
                    WHEN type = 'table' THEN 'TABLE'
                    ELSE 'VIEW'
                END AS table_type
            FROM {schema}.sqlite_master
            WHERE type IN ('table', 'view')
            ORDER BY table_type, table_name
            "#;

        pub const LIST_COLUMNS: &str = r#"
            SELECT name, type, "notnull", dflt_value
            FROM pragma_table_info(?1, ?2)
            ORDER BY cid
            "#;

        pub const LIST_PRIMARY_KEYS: &str = r#"
            SELECT name
            FROM pragma_table_info(?1, ?2)
            WHERE pk > 0
            ORDER BY pk
            "#;

        pub const LIST_FOREIGN_KEYS: &str = r#"
            SELECT "table" AS pk_table, "from" AS fk_column, "to" AS pk_column
            FROM pragma_foreign_key_list(?1, ?2)
            ORDER BY id, seq
            "#;
    }
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================

mod postgres {
    use super::*;
    use sqlx::{PgConnection, Row};

    impl CatalogProvider for PgConnection {
        async fn list_tables(
            &mut self,
            schema: Option<&str>,
            table_types: Option<&[&str]>,
        ) -> DbResult<Vec<TableDescriptor>> {
            let rows = sqlx::query(queries::postgres::LIST_TABLES)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, schema.unwrap_or("current_schema()")))?;

            let mut tables = rows
                .iter()
                .map(|row| TableDescriptor {
                    table_name: row.get("table_name"),
                    schema: row.get("table_schema"),
                    table_type: row
                        .try_get::<Option<String>, _>("table_type")
                        .ok()
                        .flatten()
                        .unwrap_or_else(|| "TABLE".to_string()),
                    remarks: non_empty(row.try_get("remarks").ok().flatten()),
                })
                .collect::<Vec<_>>();
            retain_types(&mut tables, table_types);

            debug!(count = tables.len(), schema = ?schema, "Listed PostgreSQL tables");
            Ok(tables)
        }

        async fn list_columns(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ColumnDescriptor>> {
            let rows = sqlx::query(queries::postgres::LIST_COLUMNS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| ColumnDescriptor {
                    name: row.get("column_name"),
                    data_type: row.get("type_name"),
                    size: row.try_get("column_size").ok().flatten(),
                    nullable: row.try_get("nullable").unwrap_or(true),
                    default: row.try_get("column_default").ok().flatten(),
                    remarks: non_empty(row.try_get("remarks").ok().flatten()),
                })
                .collect())
        }

        async fn list_primary_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<String>> {
            let rows = sqlx::query(queries::postgres::LIST_PRIMARY_KEYS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows.iter().map(|row| row.get("column_name")).collect())
        }

        async fn list_foreign_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ForeignKeyDescriptor>> {
            let rows = sqlx::query(queries::postgres::LIST_FOREIGN_KEYS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| ForeignKeyDescriptor {
                    fk_name: row.try_get("fk_name").ok().flatten(),
                    fk_column: row.get("fk_column"),
                    pk_table: row.get("pk_table"),
                    pk_column: row.try_get("pk_column").ok().flatten(),
                })
                .collect())
        }
    }
}

mod mysql {
    use super::*;
    use sqlx::mysql::MySqlRow;
    use sqlx::{MySqlConnection, Row};

    /// Safely get a string from a MySQL row.
    /// MySQL may return VARBINARY instead of VARCHAR depending on charset configuration.
    fn get_string(row: &MySqlRow, column: &str) -> String {
        get_optional_string(row, column).unwrap_or_default()
    }

    /// Safely get an optional string from a MySQL row.
    fn get_optional_string(row: &MySqlRow, column: &str) -> Option<String> {
        row.try_get::<Option<String>, _>(column)
            .ok()
            .flatten()
            .or_else(|| {
                row.try_get::<Option<Vec<u8>>, _>(column)
                    .ok()
                    .flatten()
                    .and_then(|bytes| String::from_utf8(bytes).ok())
            })
    }

    impl CatalogProvider for MySqlConnection {
        async fn list_tables(
            &mut self,
            schema: Option<&str>,
            table_types: Option<&[&str]>,
        ) -> DbResult<Vec<TableDescriptor>> {
            let rows = sqlx::query(queries::mysql::LIST_TABLES)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, schema.unwrap_or("DATABASE()")))?;

            let mut tables = rows
                .iter()
                .map(|row| TableDescriptor {
                    table_name: get_string(row, "TABLE_NAME"),
                    schema: get_optional_string(row, "TABLE_SCHEMA"),
                    table_type: get_string(row, "TABLE_KIND"),
                    remarks: non_empty(get_optional_string(row, "REMARKS")),
                })
                .collect::<Vec<_>>();
            retain_types(&mut tables, table_types);

            debug!(count = tables.len(), schema = ?schema, "Listed MySQL tables");
            Ok(tables)
        }

        async fn list_columns(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ColumnDescriptor>> {
            let rows = sqlx::query(queries::mysql::LIST_COLUMNS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| ColumnDescriptor {
                    name: get_string(row, "COLUMN_NAME"),
                    data_type: get_string(row, "TYPE_NAME"),
                    size: row.try_get::<Option<i64>, _>("COLUMN_SIZE").ok().flatten(),
                    nullable: get_string(row, "IS_NULLABLE") == "YES",
                    default: get_optional_string(row, "COLUMN_DEFAULT"),
                    remarks: non_empty(get_optional_string(row, "REMARKS")),
                })
                .collect())
        }

        async fn list_primary_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<String>> {
            let rows = sqlx::query(queries::mysql::LIST_PRIMARY_KEYS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| get_string(row, "COLUMN_NAME"))
                .collect())
        }

        async fn list_foreign_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ForeignKeyDescriptor>> {
            let rows = sqlx::query(queries::mysql::LIST_FOREIGN_KEYS)
                .bind(table_name)
                .bind(schema)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| ForeignKeyDescriptor {
                    fk_name: get_optional_string(row, "FK_NAME"),
                    fk_column: get_string(row, "FK_COLUMN"),
                    pk_table: get_string(row, "PK_TABLE"),
                    pk_column: get_optional_string(row, "PK_COLUMN"),
                })
                .collect())
        }
    }
}

mod sqlite {
    use super::*;
    use sqlx::{Row, SqliteConnection};

    const DEFAULT_SCHEMA: &str = "main";

    /// Quote an identifier for interpolation into SQL.
    pub(super) fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    impl CatalogProvider for SqliteConnection {
        async fn list_tables(
            &mut self,
            schema: Option<&str>,
            table_types: Option<&[&str]>,
        ) -> DbResult<Vec<TableDescriptor>> {
            let requested = schema.unwrap_or(DEFAULT_SCHEMA);

            // sqlite_master cannot be addressed through a bound parameter, so
            // the schema is resolved against the attached databases first.
            // Matching is case-insensitive like pragma_table_info.
            let resolved: Option<String> = sqlx::query(queries::sqlite::SCHEMA_EXISTS)
                .bind(requested)
                .fetch_optional(&mut *self)
                .await
                .map_err(|e| metadata_error(e, requested))?
                .map(|row| row.get("name"));
            let Some(schema_name) = resolved else {
                debug!(schema = requested, "Unknown SQLite schema");
                return Ok(Vec::new());
            };
            let schema_name = schema_name.as_str();

            let query = queries::sqlite::LIST_TABLES_TEMPLATE
                .replace("{schema}", &quote_identifier(schema_name));
            let rows = sqlx::query(&query)
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, schema_name))?;

            let mut tables = rows
                .iter()
                .map(|row| TableDescriptor {
                    table_name: row.get("table_name"),
                    schema: Some(schema_name.to_string()),
                    table_type: row.get("table_type"),
                    remarks: None,
                })
                .collect::<Vec<_>>();
            retain_types(&mut tables, table_types);

            debug!(count = tables.len(), schema = schema_name, "Listed SQLite tables");
            Ok(tables)
        }

        async fn list_columns(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ColumnDescriptor>> {
            let rows = sqlx::query(queries::sqlite::LIST_COLUMNS)
                .bind(table_name)
                .bind(schema.unwrap_or(DEFAULT_SCHEMA))
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows
                .iter()
                .map(|row| {
                    let declared: String = row.try_get("type").unwrap_or_default();
                    let notnull: i64 = row.try_get("notnull").unwrap_or(0);
                    ColumnDescriptor {
                        name: row.get("name"),
                        size: declared_type_size(&declared),
                        data_type: declared,
                        nullable: notnull == 0,
                        default: row.try_get("dflt_value").ok().flatten(),
                        remarks: None,
                    }
                })
                .collect())
        }

        async fn list_primary_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<String>> {
            let rows = sqlx::query(queries::sqlite::LIST_PRIMARY_KEYS)
                .bind(table_name)
                .bind(schema.unwrap_or(DEFAULT_SCHEMA))
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            Ok(rows.iter().map(|row| row.get("name")).collect())
        }

        async fn list_foreign_keys(
            &mut self,
            table_name: &str,
            schema: Option<&str>,
        ) -> DbResult<Vec<ForeignKeyDescriptor>> {
            let rows = sqlx::query(queries::sqlite::LIST_FOREIGN_KEYS)
                .bind(table_name)
                .bind(schema.unwrap_or(DEFAULT_SCHEMA))
                .fetch_all(&mut *self)
                .await
                .map_err(|e| metadata_error(e, table_name))?;

            // SQLite does not name foreign key constraints
            Ok(rows
                .iter()
                .map(|row| ForeignKeyDescriptor {
                    fk_name: None,
                    fk_column: row.get("fk_column"),
                    pk_table: row.get("pk_table"),
                    pk_column: row.try_get("pk_column").ok().flatten(),
                })
                .collect())
        }
    }
}
