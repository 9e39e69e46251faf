//! Integration tests for the gateway against a real SQLite database.
//!
//! Tests verify that:
//! - Result sets are bounded by max_rows and has_more reports the remainder
//! - Column order follows the statement, not the alphabet
//! - Non-SELECT statements never reach the backend
//! - Table listing and table description read the SQLite catalog
//! - The connection is read-only and can be closed repeatedly

use db_gateway_mcp::db::{ConnectionManager, DbClient, DbConnection};
use db_gateway_mcp::error::ErrorKind;
use db_gateway_mcp::models::DriverConfig;
use serde_json::json;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Executor};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Test database plus the files that must outlive it.
struct TestDb {
    db_file: NamedTempFile,
    driver_artifact: NamedTempFile,
}

impl TestDb {
    fn config(&self) -> DriverConfig {
        DriverConfig::new(
            format!("sqlite:{}", self.db_file.path().display()),
            "org.sqlite.JDBC",
            self.driver_artifact.path(),
            "reader",
            "unused",
        )
    }

    fn client(&self) -> DbClient {
        DbClient::new(self.config()).unwrap()
    }
}

/// Create a SQLite database with a small customers/orders schema.
async fn setup_db(extra_rows: usize) -> TestDb {
    let db_file = NamedTempFile::new().unwrap();
    let driver_artifact = NamedTempFile::new().unwrap();

    let mut conn = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_file.path().display()))
        .unwrap()
        .create_if_missing(true)
        .connect()
        .await
        .unwrap();

    conn.execute(
        r#"
        CREATE TABLE customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL,
            email TEXT,
            active BOOLEAN DEFAULT 1
        );
        CREATE TABLE orders (
            order_id INTEGER NOT NULL,
            line_no INTEGER NOT NULL,
            customer_id INTEGER REFERENCES customers(id),
            amount DECIMAL(10,2),
            note TEXT DEFAULT 'none',
            PRIMARY KEY (order_id, line_no)
        );
        CREATE VIEW active_customers AS SELECT * FROM customers WHERE active = 1;
        "#,
    )
    .await
    .unwrap();

    for i in 0..extra_rows {
        sqlx::query("INSERT INTO customers (name, email) VALUES (?1, ?2)")
            .bind(format!("customer {}", i))
            .bind(format!("c{}@example.com", i))
            .execute(&mut conn)
            .await
            .unwrap();
    }

    conn.close().await.unwrap();

    TestDb {
        db_file,
        driver_artifact,
    }
}

// =============================================================================
// execute_query
// =============================================================================

/// More rows than max_rows: the result is cut and has_more is set.
#[tokio::test]
async fn test_max_rows_bounds_result_and_sets_has_more() {
    let db = setup_db(5).await;
    let mut client = db.client();

    let result = client
        .execute_query("SELECT id FROM customers ORDER BY id", 2)
        .await
        .unwrap();
    assert_eq!(result.row_count, 2);
    assert_eq!(result.rows.len(), 2);
    assert!(result.has_more);
    assert_eq!(result.rows, vec![vec![json!(1)], vec![json!(2)]]);

    client.close().await;
}

/// Exactly max_rows rows: nothing is cut and has_more stays false.
#[tokio::test]
async fn test_exact_row_count_has_no_more() {
    let db = setup_db(2).await;
    let mut client = db.client();

    let result = client.execute_query("SELECT id FROM customers", 2).await.unwrap();
    assert_eq!(result.row_count, 2);
    assert!(!result.has_more);

    client.close().await;
}

/// Columns come back in statement order, not sorted.
#[tokio::test]
async fn test_column_order_preserved() {
    let db = setup_db(1).await;
    let mut client = db.client();

    let result = client
        .execute_query("SELECT email, id, name FROM customers", 10)
        .await
        .unwrap();
    assert_eq!(result.columns, vec!["email", "id", "name"]);
    assert_eq!(
        result.rows[0],
        vec![json!("c0@example.com"), json!(1), json!("customer 0")]
    );

    client.close().await;
}

/// An empty result still reports its columns.
#[tokio::test]
async fn test_empty_result_keeps_columns() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let result = client
        .execute_query("select name, email from customers", 10)
        .await
        .unwrap();
    assert_eq!(result.columns, vec!["name", "email"]);
    assert!(result.rows.is_empty());
    assert_eq!(result.row_count, 0);
    assert!(!result.has_more);

    client.close().await;
}

/// UTF-8 text survives unchanged.
#[tokio::test]
async fn test_utf8_values_round_trip() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let result = client
        .execute_query("SELECT '日本語 ✓ émoji 🚀' AS text", 1)
        .await
        .unwrap();
    assert_eq!(result.rows[0][0], json!("日本語 ✓ émoji 🚀"));

    client.close().await;
}

/// Binary values are base64 encoded and NULL stays null.
#[tokio::test]
async fn test_binary_and_null_values() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let result = client
        .execute_query("SELECT x'DEADBEEF' AS raw, NULL AS absent", 1)
        .await
        .unwrap();
    assert_eq!(result.columns, vec!["raw", "absent"]);
    assert_eq!(result.rows[0], vec![json!("3q2+7w=="), serde_json::Value::Null]);

    client.close().await;
}

/// Writes are rejected by validation before any connection is opened.
#[tokio::test]
async fn test_write_statement_rejected_without_connecting() {
    let db = setup_db(1).await;
    let mut client = db.client();

    for sql in [
        "DROP TABLE customers",
        "DELETE FROM customers",
        "INSERT INTO customers (name) VALUES ('x')",
        "-- sneaky\nSELECT 1",
        "SELECT 1; DELETE FROM customers",
    ] {
        let err = client.execute_query(sql, 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{}", sql);
    }
    assert!(!client.is_connected());

    let result = client
        .execute_query("SELECT COUNT(*) AS n FROM customers", 1)
        .await
        .unwrap();
    assert_eq!(result.rows[0][0], json!(1));

    client.close().await;
}

/// Validation wins over an unreachable backend.
#[tokio::test]
async fn test_validation_precedes_connection() {
    let artifact = NamedTempFile::new().unwrap();
    let config = DriverConfig::new(
        "jdbc:postgresql://127.0.0.1:1/nowhere",
        "org.postgresql.Driver",
        artifact.path(),
        "reader",
        "secret",
    );
    let mut client = DbClient::new(config).unwrap();

    let err = client.execute_query("DROP TABLE users", 10).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.describe_table("  ", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.execute_query("SELECT 1", 10).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!err.to_string().contains("secret"));
}

/// The session cannot write even if a write slipped past validation.
#[tokio::test]
async fn test_connection_is_read_only() {
    let db = setup_db(0).await;
    let mut manager = ConnectionManager::new(db.config()).unwrap();

    let DbConnection::SQLite(conn) = manager.connection().await.unwrap() else {
        panic!("expected a SQLite connection");
    };
    let result = conn
        .execute("INSERT INTO customers (name) VALUES ('intruder')")
        .await;
    assert!(result.is_err());

    manager.close().await;

    let mut client = db.client();
    let result = client
        .execute_query("SELECT COUNT(*) FROM customers", 1)
        .await
        .unwrap();
    assert_eq!(result.rows[0][0], json!(0));
    client.close().await;
}

/// Backend errors are reported as query execution errors.
#[tokio::test]
async fn test_missing_table_is_query_error() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let err = client
        .execute_query("SELECT * FROM no_such_table", 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QueryExecution);
    assert!(err.to_string().starts_with("Query failed:"));
    assert!(err.to_string().contains("no_such_table"));

    client.close().await;
}

// =============================================================================
// get_tables / get_columns
// =============================================================================

/// Only ordinary tables by default; system tables and views on request.
#[tokio::test]
async fn test_list_tables_include_system() {
    let db = setup_db(1).await;
    let mut client = db.client();

    let tables = client.list_tables(None, false).await.unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["customers", "orders"]);
    assert!(tables.iter().all(|t| t.table_type == "TABLE"));
    assert!(tables.iter().all(|t| t.schema.as_deref() == Some("main")));

    let all = client.list_tables(Some("main"), true).await.unwrap();
    let names: Vec<_> = all.iter().map(|t| t.table_name.as_str()).collect();
    assert!(names.contains(&"sqlite_sequence"));
    assert!(names.contains(&"active_customers"));
    assert_eq!(all.len(), 4);

    client.close().await;
}

/// An unknown schema lists nothing.
#[tokio::test]
async fn test_list_tables_unknown_schema_is_empty() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let tables = client.list_tables(Some("elsewhere"), true).await.unwrap();
    assert!(tables.is_empty());

    client.close().await;
}

/// Schema names match without regard to case, for listing and describing alike.
#[tokio::test]
async fn test_schema_name_case_insensitive() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let tables = client.list_tables(Some("MAIN"), false).await.unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["customers", "orders"]);
    assert!(tables.iter().all(|t| t.schema.as_deref() == Some("main")));

    let described = client.describe_table("orders", Some("MAIN")).await.unwrap();
    assert!(!described.columns.is_empty());

    client.close().await;
}

/// Columns, composite primary key and foreign key of one table.
#[tokio::test]
async fn test_describe_table_with_keys() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let schema = client.describe_table("orders", None).await.unwrap();
    assert_eq!(schema.table_name, "orders");
    assert_eq!(schema.schema, None);

    let columns: Vec<_> = schema.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, vec!["order_id", "line_no", "customer_id", "amount", "note"]);

    let amount = &schema.columns[3];
    assert_eq!(amount.data_type, "DECIMAL(10,2)");
    assert_eq!(amount.size, Some(10));
    assert!(amount.nullable);

    let order_id = &schema.columns[0];
    assert!(!order_id.nullable);

    let note = &schema.columns[4];
    assert_eq!(note.default.as_deref(), Some("'none'"));

    assert_eq!(schema.primary_keys, vec!["order_id", "line_no"]);

    assert_eq!(schema.foreign_keys.len(), 1);
    let fk = &schema.foreign_keys[0];
    assert_eq!(fk.fk_column, "customer_id");
    assert_eq!(fk.pk_table, "customers");
    assert_eq!(fk.pk_column.as_deref(), Some("id"));

    client.close().await;
}

/// A table without foreign keys reports an empty list.
#[tokio::test]
async fn test_describe_table_without_foreign_keys() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let schema = client.describe_table("customers", Some("main")).await.unwrap();
    assert_eq!(schema.schema.as_deref(), Some("main"));
    assert_eq!(schema.primary_keys, vec!["id"]);
    assert!(schema.foreign_keys.is_empty());

    let serialized = serde_json::to_value(&schema).unwrap();
    assert_eq!(serialized["foreign_keys"], json!([]));
    assert_eq!(serialized["columns"][1]["type"], "VARCHAR(100)");

    client.close().await;
}

/// An unknown table yields empty lists, not an error.
#[tokio::test]
async fn test_describe_missing_table_is_empty() {
    let db = setup_db(0).await;
    let mut client = db.client();

    let schema = client.describe_table("ghost", None).await.unwrap();
    assert!(schema.columns.is_empty());
    assert!(schema.primary_keys.is_empty());
    assert!(schema.foreign_keys.is_empty());

    client.close().await;
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Closing twice in a row is harmless.
#[tokio::test]
async fn test_close_twice() {
    let db = setup_db(1).await;
    let mut client = db.client();

    client.execute_query("SELECT 1", 1).await.unwrap();
    assert!(client.is_connected());

    client.close().await;
    client.close().await;
    assert!(!client.is_connected());

    // The next operation reconnects lazily
    client.execute_query("SELECT 1", 1).await.unwrap();
    client.close().await;
}

/// A missing driver artifact is a configuration error, reported before connecting.
#[tokio::test]
async fn test_missing_driver_artifact_is_config_error() {
    let db = setup_db(0).await;
    let mut config = db.config();
    config.driver_artifact_path = db.db_file.path().with_extension("missing.jar");

    let err = DbClient::new(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().starts_with("Configuration error:"));
}
