//! Business logic, one module per bounded context.
//!
//! - `todos`: the todo item model and its storage backends
//! - `tools`: MCP tools that expose the todo store to clients

pub mod todos;
pub mod tools;
