//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by routing tool calls to the todo tools.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and routed through a ToolRouter built in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::todos::{BackendKind, BackendSelection, StoreObserver, TodoStore};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// Instructions advertised to clients on initialization.
pub const INSTRUCTIONS: &str = "Manage a todo list: add, list, fetch, update, delete and toggle todo items.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and owns the
/// todo store shared by every tool.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Todo store shared by every tool.
    store: Arc<TodoStore>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

/// Observer that reports backend selection through tracing.
pub fn log_backend_selection() -> StoreObserver {
    Arc::new(|selection: &BackendSelection| {
        if selection.is_fallback() {
            warn!("Todo store {}", selection);
        } else {
            info!("Todo store {}", selection);
        }
    })
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The store is not connected yet; see [`McpServer::open`].
    pub fn new(config: Config) -> Self {
        let store = TodoStore::new(config.storage.clone()).with_observer(log_backend_selection());
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server over an existing store.
    pub fn with_store(config: Config, store: Arc<TodoStore>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(store.clone()),
            config: Arc::new(config),
            store,
        }
    }

    /// Select the storage backend before serving any request.
    pub async fn open(&self) -> CoreResult<BackendKind> {
        Ok(self.store.open().await?)
    }

    /// Release the storage backend.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the todo store.
    pub fn store(&self) -> &Arc<TodoStore> {
        &self.store
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.store.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_lists_todo_tools() {
        let server = McpServer::with_store(Config::default(), Arc::new(TodoStore::in_memory()));
        let tools = server.list_tools();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().any(|t| t["name"] == "add_todo"));
    }

    #[tokio::test]
    async fn test_open_and_shutdown() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.open().await.unwrap(), BackendKind::Memory);

        server.shutdown().await;
        assert!(server.store().get_all().await.is_err());
    }

    #[test]
    fn test_get_info_advertises_tools() {
        let server = McpServer::with_store(Config::default(), Arc::new(TodoStore::in_memory()));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.instructions.as_deref(), Some(INSTRUCTIONS));
    }
}
