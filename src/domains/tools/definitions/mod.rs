//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod todo;

pub use todo::{
    AddTodoParams, AddTodoTool, DeleteTodoParams, DeleteTodoTool, GetAllTodosParams,
    GetAllTodosTool, GetTodoParams, GetTodoTool, ToggleTodoParams, ToggleTodoTool,
    UpdateTodoParams, UpdateTodoTool,
};
