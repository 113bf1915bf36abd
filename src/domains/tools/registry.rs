//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{
    AddTodoTool, DeleteTodoTool, GetAllTodosTool, GetTodoTool, ToggleTodoTool, UpdateTodoTool,
};
#[cfg(feature = "http")]
use super::error::ToolError;
use crate::domains::todos::TodoStore;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    store: Arc<TodoStore>,
}

impl ToolRegistry {
    /// Create a new tool registry over the given store.
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            AddTodoTool::NAME,
            GetAllTodosTool::NAME,
            GetTodoTool::NAME,
            UpdateTodoTool::NAME,
            DeleteTodoTool::NAME,
            ToggleTodoTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            AddTodoTool::to_tool(),
            GetAllTodosTool::to_tool(),
            GetTodoTool::to_tool(),
            UpdateTodoTool::to_tool(),
            DeleteTodoTool::to_tool(),
            ToggleTodoTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let store = self.store.clone();
        match name {
            AddTodoTool::NAME => AddTodoTool::http_handler(arguments, store).await,
            GetAllTodosTool::NAME => GetAllTodosTool::http_handler(arguments, store).await,
            GetTodoTool::NAME => GetTodoTool::http_handler(arguments, store).await,
            UpdateTodoTool::NAME => UpdateTodoTool::http_handler(arguments, store).await,
            DeleteTodoTool::NAME => DeleteTodoTool::http_handler(arguments, store).await,
            ToggleTodoTool::NAME => ToggleTodoTool::http_handler(arguments, store).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(TodoStore::in_memory()))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 6);
        for name in [
            "add_todo",
            "get_all_todos",
            "get_todo",
            "update_todo",
            "delete_todo",
            "toggle_todo_status",
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_tool_metadata_matches_names() {
        let names = test_registry().tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), names.len());
        for tool in &tools {
            assert!(names.contains(&tool.name.as_ref()));
            assert!(tool.description.is_some());
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_add_then_list() {
        let registry = test_registry();
        tokio_test::block_on(async {
            registry
                .call_tool("add_todo", serde_json::json!({ "title": "Via registry" }))
                .await
                .unwrap();
            let listed = registry
                .call_tool("get_all_todos", serde_json::json!({}))
                .await
                .unwrap();
            assert_eq!(listed["structuredContent"]["count"], 1);
        });
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = test_registry();
        let result = tokio_test::block_on(registry.call_tool("unknown", serde_json::json!({})));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_bad_arguments() {
        let registry = test_registry();
        let result = tokio_test::block_on(
            registry.call_tool("delete_todo", serde_json::json!({ "todo_id": 42 })),
        );
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
