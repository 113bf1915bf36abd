//! Todo tools - one file per MCP tool over the todo store.

pub mod add;
pub mod common;
pub mod delete;
pub mod get;
pub mod list;
pub mod toggle;
pub mod update;

pub use add::{AddTodoParams, AddTodoTool};
pub use delete::{DeleteTodoParams, DeleteTodoTool};
pub use get::{GetTodoParams, GetTodoTool};
pub use list::{GetAllTodosParams, GetAllTodosTool};
pub use toggle::{ToggleTodoParams, ToggleTodoTool};
pub use update::{UpdateTodoParams, UpdateTodoTool};
