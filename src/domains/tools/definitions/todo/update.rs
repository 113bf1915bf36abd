//! Update todo tool definition.
//!
//! Applies a partial update: only the arguments that are present change.
//! An explicit `null` clears `description` or `due_date`.

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
    INVALID_DUE_DATE, double_option, error_result, format_todo, parse_due_date, parse_params,
    store_error_result, structured_result,
};
use crate::domains::todos::{TodoItem, TodoPatch, TodoStore};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the update todo tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateTodoParams {
    /// ID of the todo item to update.
    pub todo_id: String,

    /// New title of the todo item.
    #[serde(default)]
    pub title: Option<String>,

    /// New description of the todo item (null clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// Whether the todo item is completed.
    #[serde(default)]
    pub completed: Option<bool>,

    /// New due date for the todo item (ISO format, null clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,

    /// New priority level: low, medium or high.
    #[serde(default)]
    pub priority: Option<String>,
}

impl UpdateTodoParams {
    /// Convert the arguments into a store patch.
    ///
    /// An empty due-date string counts as not provided.
    fn to_patch(&self) -> Result<TodoPatch, &'static str> {
        let due_date = match &self.due_date {
            Some(Some(raw)) if raw.is_empty() => None,
            Some(Some(raw)) => Some(Some(parse_due_date(raw).ok_or(INVALID_DUE_DATE)?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(TodoPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            due_date,
            priority: self.priority.clone(),
        })
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Update todo tool - changes fields of an existing item.
pub struct UpdateTodoTool;

impl UpdateTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update an existing todo item. Only the provided fields are changed; pass null to clear description or due_date.";

    #[instrument(skip_all, fields(todo_id = %params.todo_id))]
    pub async fn execute(params: &UpdateTodoParams, store: &TodoStore) -> CallToolResult {
        info!("Update todo tool called");

        if params.todo_id.is_empty() {
            return error_result("todo_id is required");
        }

        let patch = match params.to_patch() {
            Ok(patch) => patch,
            Err(message) => return error_result(message),
        };

        match store.update(&params.todo_id, patch).await {
            Ok(Some(todo)) => {
                let summary = format!("Todo item updated successfully:\n{}", format_todo(&todo));
                structured_result(summary, &todo)
            }
            Ok(None) => error_result("Todo item not found or no changes made"),
            Err(e) => store_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<TodoStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: UpdateTodoParams = parse_params(arguments)?;
        let result = Self::execute(&params, &store).await;
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<UpdateTodoParams>().into(),
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
                let params: UpdateTodoParams = parse_params(serde_json::Value::Object(args))
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
