//! Todo MCP Server Library
//!
//! A Model Context Protocol server that manages todo items. Items are stored
//! in MongoDB when a connection string is configured and reachable, and in
//! process memory otherwise.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **todos**: the todo model, the store and its backends
//!   - **tools**: MCP tools that clients call to manage todo items
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     server.open().await?;
//!     TransportService::new(config.transport).run(server.clone()).await?;
//!     server.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
