//! Tools domain module.
//!
//! MCP tools exposing the todo store to clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool metadata and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/todo/`
//! 2. Define params, execute(), to_tool(), create_route() and http_handler()
//! 3. Export it in `definitions/mod.rs`
//! 4. Add its route in `router.rs` and register it in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
