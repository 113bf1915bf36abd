//! Tool Router - builds the rmcp ToolRouter.
//!
//! Builds the ToolRouter for STDIO/TCP transport by delegating to the tool
//! definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AddTodoTool, DeleteTodoTool, GetAllTodosTool, GetTodoTool, ToggleTodoTool, UpdateTodoTool,
};
use crate::domains::todos::TodoStore;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(store: Arc<TodoStore>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AddTodoTool::create_route(store.clone()))
        .with_route(GetAllTodosTool::create_route(store.clone()))
        .with_route(GetTodoTool::create_route(store.clone()))
        .with_route(UpdateTodoTool::create_route(store.clone()))
        .with_route(DeleteTodoTool::create_route(store.clone()))
        .with_route(ToggleTodoTool::create_route(store))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_store() -> Arc<TodoStore> {
        Arc::new(TodoStore::in_memory())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_store());
        let tools = router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"add_todo"));
        assert!(names.contains(&"get_all_todos"));
        assert!(names.contains(&"toggle_todo_status"));
    }

    #[test]
    fn test_registry_matches_router() {
        let store = test_store();
        let registry = ToolRegistry::new(store.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(store);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
