//! List todos tool definition.
//!
//! Returns every stored todo item in the backend's order.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{format_todo, parse_params, store_error_result, structured_result};
use crate::domains::todos::{TodoItem, TodoStore};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// The list tool takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetAllTodosParams {}

/// Structured output for the list tool.
#[derive(Debug, Serialize, JsonSchema)]
struct TodoListResult {
    /// Number of items returned.
    count: usize,
    todos: Vec<TodoItem>,
}

/// Get all todos tool.
pub struct GetAllTodosTool;

impl GetAllTodosTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_all_todos";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get all todo items";

    #[instrument(skip_all)]
    pub async fn execute(_params: &GetAllTodosParams, store: &TodoStore) -> CallToolResult {
        info!("Get all todos tool called");

        let todos = match store.get_all().await {
            Ok(todos) => todos,
            Err(e) => return store_error_result(&e),
        };

        if todos.is_empty() {
            return CallToolResult {
                content: vec![Content::text("No todo items found.")],
                structured_content: Some(serde_json::json!({ "count": 0, "todos": [] })),
                is_error: Some(false),
                meta: None,
            };
        }

        let listing = todos
            .iter()
            .enumerate()
            .map(|(i, todo)| format!("{}. {}", i + 1, format_todo(todo)))
            .collect::<Vec<_>>()
            .join("\n\n");
        let summary = format!("All Todo Items:\n\n{}", listing);

        info!("Returning {} todo items", todos.len());
        structured_result(
            summary,
            &TodoListResult {
                count: todos.len(),
                todos,
            },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<TodoStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetAllTodosParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetAllTodosParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<TodoListResult>().into()),
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
                let params: GetAllTodosParams = parse_params(serde_json::Value::Object(args))
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
    async fn test_empty_store() {
        let store = TodoStore::in_memory();
        let result = GetAllTodosTool::execute(&GetAllTodosParams::default(), &store).await;
        assert_eq!(text_of(&result), "No todo items found.");
        assert_eq!(result.structured_content.unwrap()["count"], 0);
    }

    #[tokio::test]
    async fn test_numbered_listing() {
        let store = TodoStore::in_memory();
        store.create(NewTodo::new("first")).await.unwrap();
        store.create(NewTodo::new("second")).await.unwrap();

        let result = GetAllTodosTool::execute(&GetAllTodosParams::default(), &store).await;
        let text = text_of(&result);
        assert!(text.starts_with("All Todo Items:\n\n1. ID: "));
        assert!(text.contains("\n\n2. ID: "));
        assert!(text.find("Title: first").unwrap() < text.find("Title: second").unwrap());

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 2);
        assert_eq!(structured["todos"][1]["title"], "second");
    }

    #[tokio::test]
    async fn test_closed_store_reports_error() {
        let store = TodoStore::in_memory();
        store.close().await;

        let result = GetAllTodosTool::execute(&GetAllTodosParams::default(), &store).await;
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).starts_with("Error:"));
    }
}
