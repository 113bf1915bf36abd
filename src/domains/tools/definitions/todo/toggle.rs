//! Toggle todo status tool definition.

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

/// Parameters for the toggle tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ToggleTodoParams {
    /// ID of the todo item to toggle.
    pub todo_id: String,
}

/// Toggle tool - flips the completion status of an item.
pub struct ToggleTodoTool;

impl ToggleTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "toggle_todo_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Toggle the completion status of a todo item";

    #[instrument(skip_all, fields(todo_id = %params.todo_id))]
    pub async fn execute(params: &ToggleTodoParams, store: &TodoStore) -> CallToolResult {
        info!("Toggle todo tool called");

        if params.todo_id.is_empty() {
            return error_result("todo_id is required");
        }

        match store.toggle(&params.todo_id).await {
            Ok(Some(todo)) => {
                let status = if todo.completed { "completed" } else { "pending" };
                let summary = format!(
                    "Todo item status toggled to {}:\n{}",
                    status,
                    format_todo(&todo)
                );
                structured_result(summary, &todo)
            }
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
        let params: ToggleTodoParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ToggleTodoParams>().into(),
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
                let params: ToggleTodoParams = parse_params(serde_json::Value::Object(args))
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
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let store = TodoStore::in_memory();
        let todo = store.create(NewTodo::new("Stretch")).await.unwrap();
        let params = ToggleTodoParams {
            todo_id: todo.id.clone(),
        };

        let first = ToggleTodoTool::execute(&params, &store).await;
        assert!(text_of(&first).starts_with("Todo item status toggled to completed:"));
        assert_eq!(first.structured_content.unwrap()["completed"], true);

        let second = ToggleTodoTool::execute(&params, &store).await;
        assert!(text_of(&second).starts_with("Todo item status toggled to pending:"));
    }

    #[tokio::test]
    async fn test_toggle_unknown() {
        let store = TodoStore::in_memory();
        let params = ToggleTodoParams {
            todo_id: "65f0c0ffee0000000000beef".to_string(),
        };
        let result = ToggleTodoTool::execute(&params, &store).await;
        assert_eq!(text_of(&result), "Todo item not found");
    }
}
