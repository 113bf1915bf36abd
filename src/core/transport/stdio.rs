//! STDIO transport implementation.
//!
//! A single rmcp session over stdin/stdout. Logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("{} ready on stdin/stdout", server.name());

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO session ended");
        Ok(())
    }
}
