//! Get todo tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{error_result, format_todo, parse_params, store_error_result, structured_result};
use crate::domains::todos::{TodoItem, TodoStore};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the get todo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTodoParams {
    /// ID of the todo item to fetch.
    pub todo_id: String,
}

/// Get todo tool - fetches a single item by id.
pub struct GetTodoTool;

impl GetTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a single todo item by its ID";

    #[instrument(skip_all, fields(todo_id = %params.todo_id))]
    pub async fn execute(params: &GetTodoParams, store: &TodoStore) -> CallToolResult {
        info!("Get todo tool called");

        match store.get_by_id(&params.todo_id).await {
            Ok(Some(todo)) => structured_result(format_todo(&todo), &todo),
            Ok(None) => error_result("Todo item not found"),
            Err(e) => store_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<TodoStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetTodoParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetTodoParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<TodoItem>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<TodoStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let store = store.clone();
            async move {
                let params: GetTodoParams = parse_params(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &store).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::NewTodo;

    #[tokio::test]
    async fn test_get_existing() {
        let store = TodoStore::in_memory();
        let todo = store.create(NewTodo::new("Call mum")).await.unwrap();

        let params = GetTodoParams {
            todo_id: todo.id.clone(),
        };
        let result = GetTodoTool::execute(&params, &store).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["id"], todo.id.as_str());
    }

    #[tokio::test]
    async fn test_get_malformed_id() {
        let store = TodoStore::in_memory();
        let params = GetTodoParams {
            todo_id: "nope".to_string(),
        };
        let result = GetTodoTool::execute(&params, &store).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
