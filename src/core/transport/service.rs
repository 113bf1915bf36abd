//! Transport service - runs the configured transport until it stops or the
//! process receives Ctrl+C.

use tracing::{info, warn};

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serve `server` over the configured transport.
    ///
    /// Returns when the transport finishes or on Ctrl+C. The caller owns the
    /// store lifecycle and closes it afterwards.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        let serve = async move {
            match self.config {
                #[cfg(feature = "stdio")]
                TransportConfig::Stdio => StdioTransport::run(server).await,
                #[cfg(feature = "tcp")]
                TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
                #[cfg(feature = "http")]
                TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
            }
        };

        tokio::select! {
            result = serve => result,
            () = wait_for_ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                Ok(())
            }
        }
    }
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed,
/// so the transport keeps serving.
async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C, serving without it: {}", e);
        std::future::pending::<()>().await;
    }
}
