//! Add todo tool definition.

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

use super::common::{
    INVALID_DUE_DATE, error_result, format_todo, parse_due_date, parse_params, store_error_result,
    structured_result,
};
use crate::domains::todos::{NewTodo, TodoItem, TodoStore};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add todo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddTodoParams {
    /// Title of the todo item.
    pub title: String,

    /// Detailed description of the todo item.
    #[serde(default)]
    pub description: Option<String>,

    /// Due date for the todo item (ISO format).
    #[serde(default)]
    pub due_date: Option<String>,

    /// Priority level: low, medium or high (default: medium).
    #[serde(default)]
    pub priority: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add todo tool - creates a new todo item.
pub struct AddTodoTool;

impl AddTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new todo item. Only the title is required; priority defaults to medium.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(title = %params.title))]
    pub async fn execute(params: &AddTodoParams, store: &TodoStore) -> CallToolResult {
        info!("Add todo tool called");

        if params.title.trim().is_empty() {
            return error_result("Title is required");
        }

        let due_date = match params.due_date.as_deref().filter(|d| !d.is_empty()) {
            Some(raw) => match parse_due_date(raw) {
                Some(date) => Some(date),
                None => return error_result(INVALID_DUE_DATE),
            },
            None => None,
        };

        let new = NewTodo {
            title: params.title.clone(),
            description: params.description.clone(),
            due_date,
            priority: params.priority.clone(),
        };

        match store.create(new).await {
            Ok(todo) => {
                info!("Created todo {}", todo.id);
                let summary = format!("Todo item created successfully:\n{}", format_todo(&todo));
                structured_result(summary, &todo)
            }
            Err(e) => store_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<TodoStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: AddTodoParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<AddTodoParams>().into(),
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
                let params: AddTodoParams = parse_params(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &store).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn params(title: &str) -> AddTodoParams {
        AddTodoParams {
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: None,
        }
    }

    #[tokio::test]
    async fn test_add_todo() {
        let store = TodoStore::in_memory();
        let mut params = params("Buy milk");
        params.priority = Some("high".to_string());
        params.due_date = Some("2024-06-01T10:00:00Z".to_string());

        let result = AddTodoTool::execute(&params, &store).await;
        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).starts_with("Todo item created successfully:"));

        let structured = result.structured_content.expect("structured_content should exist");
        assert_eq!(structured["title"], "Buy milk");
        assert_eq!(structured["priority"], "high");
        assert_eq!(structured["completed"], false);
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_default_priority() {
        let store = TodoStore::in_memory();
        let result = AddTodoTool::execute(&params("Walk dog"), &store).await;
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["priority"], "medium");
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let store = TodoStore::in_memory();
        let result = AddTodoTool::execute(&params("   "), &store).await;
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "Title is required");
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_due_date_rejected() {
        let store = TodoStore::in_memory();
        let mut params = params("Pay rent");
        params.due_date = Some("next friday".to_string());

        let result = AddTodoTool::execute(&params, &store).await;
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), INVALID_DUE_DATE);
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_missing_title_is_invalid_params() {
        let result: Result<AddTodoParams, _> =
            parse_params(serde_json::json!({ "priority": "low" }));
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_add_http_handler() {
        let store = Arc::new(TodoStore::in_memory());
        let args = serde_json::json!({ "title": "From HTTP" });

        let value = AddTodoTool::http_handler(args, store.clone()).await.unwrap();
        assert_eq!(value["structuredContent"]["title"], "From HTTP");
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }
}
