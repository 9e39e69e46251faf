//! MCP service implementation using rmcp.
//!
//! This module defines the GatewayService struct with the three gateway tools
//! exposed via the MCP protocol using the rmcp framework's macros.
//!
//! Tool failures never become protocol errors: they are returned as a tool
//! result flagged `isError` whose content is `{"error": "<message>"}`.

use crate::error::{DbError, DbResult};
use crate::models::DriverConfig;
use crate::tools::query::{ExecuteQueryInput, QueryToolHandler};
use crate::tools::schema::{GetColumnsInput, GetTablesInput, SchemaToolHandler};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::common::schema_for_type,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, JsonObject, ProtocolVersion, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct GatewayService {
    /// Driver settings every call builds its client from
    config: Arc<DriverConfig>,
    /// Upper bound for one tool call's database work
    query_timeout: Duration,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl GatewayService {
    /// Create a new GatewayService instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Driver settings shared by all tool calls
    /// * `query_timeout` - Time limit applied to each tool call
    pub fn new(config: Arc<DriverConfig>, query_timeout: Duration) -> Self {
        Self {
            config,
            query_timeout,
            tool_router: Self::tool_router(),
        }
    }
}

/// Convert an operation result into a tool result.
///
/// Success serializes the output as JSON content. Failure becomes an error
/// result carrying only the error message.
pub fn tool_result<T: Serialize>(result: DbResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(output) => Ok(CallToolResult::success(vec![Content::json(output)?])),
        Err(e) => Ok(CallToolResult::error(vec![Content::json(
            json!({ "error": e.to_string() }),
        )?])),
    }
}

/// Decode raw tool arguments into a tool's input type.
///
/// Tools take the argument object as-is so that malformed arguments come
/// back as an error record instead of a protocol error.
fn parse_arguments<T: DeserializeOwned>(arguments: JsonObject) -> DbResult<T> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| DbError::validation(format!("invalid arguments: {}", e)))
}

#[tool_router]
impl GatewayService {
    #[tool(
        description = "Execute a read-only SELECT query and return results.\nOnly a single statement starting with SELECT is accepted.\nReturns {columns, rows, row_count, has_more}. Rows are arrays in column order.\nmax_rows defaults to 100 and is clamped to 1..1000; has_more tells whether more rows exist.\nExample: {\"query\": \"SELECT id, name FROM users ORDER BY id\", \"max_rows\": 20}",
        input_schema = schema_for_type::<ExecuteQueryInput>()
    )]
    async fn execute_query(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let input = match parse_arguments::<ExecuteQueryInput>(arguments) {
            Ok(input) => input,
            Err(e) => return tool_result::<()>(Err(e)),
        };
        let handler = QueryToolHandler::new(self.config.clone(), self.query_timeout);
        tool_result(handler.execute_query(input).await)
    }

    #[tool(
        description = "List tables in a schema.\nOmit schema to use the connection's default schema.\nSet include_system to also list system tables and views.\nReturns {tables: [{table_name, schema, type, remarks}], count}.",
        input_schema = schema_for_type::<GetTablesInput>()
    )]
    async fn get_tables(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let input = match parse_arguments::<GetTablesInput>(arguments) {
            Ok(input) => input,
            Err(e) => return tool_result::<()>(Err(e)),
        };
        let handler = SchemaToolHandler::new(self.config.clone(), self.query_timeout);
        tool_result(handler.get_tables(input).await)
    }

    #[tool(
        description = "Describe a table's columns, primary keys and foreign keys.\nReturns {table_name, schema, columns, primary_keys, foreign_keys}.\nAn unknown table returns empty lists.\nExample: {\"table_name\": \"orders\", \"schema\": \"public\"}",
        input_schema = schema_for_type::<GetColumnsInput>()
    )]
    async fn get_columns(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let input = match parse_arguments::<GetColumnsInput>(arguments) {
            Ok(input) => input,
            Err(e) => return tool_result::<()>(Err(e)),
        };
        let handler = SchemaToolHandler::new(self.config.clone(), self.query_timeout);
        tool_result(handler.get_columns(input).await)
    }
}

#[tool_handler]
impl ServerHandler for GatewayService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "db-gateway-mcp".to_owned(),
                title: Some("DB Gateway MCP".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only access to one SQL database (PostgreSQL, MySQL/MariaDB or SQLite).\n\
                \n\
                ## Workflow\n\
                1. Call `get_tables` to see which tables exist\n\
                2. Call `get_columns` for the tables you need\n\
                3. Call `execute_query` with a single SELECT statement\n\
                \n\
                ## Notes\n\
                - Only statements starting with SELECT are accepted. CTEs, EXPLAIN and comments before SELECT are rejected.\n\
                - Results are bounded by `max_rows` (default 100, at most 1000). Check `has_more` and refine the query.\n\
                - Binary values are base64, temporal values are ISO-8601 and decimals are strings.\n\
                - Failures return `{\"error\": \"...\"}`."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    fn create_test_service() -> GatewayService {
        let config = DriverConfig::new("sqlite:app.db", "sqlite", "/no/such/driver.jar", "u", "p");
        GatewayService::new(Arc::new(config), Duration::from_secs(5))
    }

    fn first_text(result: &CallToolResult) -> serde_json::Value {
        let value = serde_json::to_value(result).unwrap();
        let text = value["content"][0]["text"].as_str().unwrap().to_string();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_server_info() {
        let service = create_test_service();
        let info = service.get_info();
        assert_eq!(info.server_info.name, "db-gateway-mcp");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_tools_registered() {
        let service = create_test_service();
        let mut names: Vec<String> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["execute_query", "get_columns", "get_tables"]);
    }

    #[test]
    fn test_tool_result_success() {
        let result = tool_result(Ok(json!({"count": 0}))).unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(first_text(&result), json!({"count": 0}));
    }

    #[test]
    fn test_tool_result_error_shape() {
        let result = tool_result::<()>(Err(DbError::validation("only SELECT allowed"))).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            first_text(&result),
            json!({"error": "Validation error: only SELECT allowed"})
        );
    }

    fn arguments(value: serde_json::Value) -> Parameters<JsonObject> {
        Parameters(value.as_object().unwrap().clone())
    }

    fn error_text(result: &CallToolResult) -> String {
        assert_eq!(result.is_error, Some(true));
        first_text(result)["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_published_schemas_describe_inputs() {
        let service = create_test_service();
        let tools = service.tool_router.list_all();
        let schema_of = |name: &str| {
            tools
                .iter()
                .find(|t| t.name == name)
                .map(|t| serde_json::Value::Object((*t.input_schema).clone()))
                .unwrap()
        };

        let query = schema_of("execute_query");
        assert!(query["properties"]["query"].is_object());
        assert!(query["properties"]["max_rows"].is_object());
        assert_eq!(query["required"], json!(["query"]));

        let tables = schema_of("get_tables");
        assert!(tables["properties"]["include_system"].is_object());

        let columns = schema_of("get_columns");
        assert_eq!(columns["required"], json!(["table_name"]));
    }

    #[tokio::test]
    async fn test_missing_query_is_error_record() {
        let service = create_test_service();
        let result = service
            .execute_query(arguments(json!({"max_rows": 5})))
            .await
            .unwrap();
        let error = error_text(&result);
        assert!(error.starts_with("Validation error: invalid arguments:"), "{}", error);
        assert!(error.contains("missing field `query`"), "{}", error);
    }

    #[tokio::test]
    async fn test_mistyped_max_rows_is_error_record() {
        let service = create_test_service();
        let result = service
            .execute_query(arguments(json!({"query": "SELECT 1", "max_rows": "ten"})))
            .await
            .unwrap();
        assert!(error_text(&result).starts_with("Validation error: invalid arguments:"));
    }

    #[tokio::test]
    async fn test_missing_table_name_is_error_record() {
        let service = create_test_service();
        let result = service.get_columns(arguments(json!({}))).await.unwrap();
        let error = error_text(&result);
        assert!(error.contains("missing field `table_name`"), "{}", error);
    }

    #[tokio::test]
    async fn test_mistyped_include_system_is_error_record() {
        let service = create_test_service();
        let result = service
            .get_tables(arguments(json!({"include_system": "yes"})))
            .await
            .unwrap();
        assert!(error_text(&result).starts_with("Validation error: invalid arguments:"));
    }

    #[tokio::test]
    async fn test_invalid_config_reported_per_call() {
        let service = create_test_service();
        let result = service
            .execute_query(arguments(json!({"query": "SELECT 1"})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        let error = first_text(&result)["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Configuration error:"));
    }
}
