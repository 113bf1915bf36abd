//! Delete todo tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{error_result, parse_params, store_error_result, structured_result};
use crate::domains::todos::TodoStore;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the delete todo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTodoParams {
    /// ID of the todo item to delete.
    pub todo_id: String,
}

/// Result of a delete operation
#[derive(Debug, Serialize, JsonSchema)]
struct DeleteResult {
    todo_id: String,
    deleted: bool,
}

/// Delete todo tool - removes an item.
pub struct DeleteTodoTool;

impl DeleteTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a todo item";

    #[instrument(skip_all, fields(todo_id = %params.todo_id))]
    pub async fn execute(params: &DeleteTodoParams, store: &TodoStore) -> CallToolResult {
        info!("Delete todo tool called");

        if params.todo_id.is_empty() {
            return error_result("todo_id is required");
        }

        match store.delete(&params.todo_id).await {
            Ok(true) => {
                info!("Deleted todo {}", params.todo_id);
                structured_result(
                    "Todo item deleted successfully".to_string(),
                    &DeleteResult {
                        todo_id: params.todo_id.clone(),
                        deleted: true,
                    },
                )
            }
            Ok(false) => error_result("Todo item not found"),
            Err(e) => store_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<TodoStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DeleteTodoParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeleteTodoParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DeleteResult>().into()),
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
                let params: DeleteTodoParams = parse_params(serde_json::Value::Object(args))
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
    async fn test_delete_then_missing() {
        let store = TodoStore::in_memory();
        let todo = store.create(NewTodo::new("Temporary")).await.unwrap();
        let params = DeleteTodoParams {
            todo_id: todo.id.clone(),
        };

        let first = DeleteTodoTool::execute(&params, &store).await;
        assert_eq!(first.is_error, Some(false));
        assert_eq!(first.structured_content.unwrap()["deleted"], true);

        let second = DeleteTodoTool::execute(&params, &store).await;
        assert!(second.is_error.unwrap_or(false));
        assert!(store.get_by_id(&todo.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_malformed_id() {
        let store = TodoStore::in_memory();
        let params = DeleteTodoParams {
            todo_id: "12345".to_string(),
        };
        let result = DeleteTodoTool::execute(&params, &store).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
