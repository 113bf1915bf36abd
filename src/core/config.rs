//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Todo storage configuration.
    pub storage: StorageConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Todo storage configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// MongoDB connection string. When absent, items are kept in memory.
    pub uri: Option<String>,

    /// Database holding the todo collection.
    pub database: String,

    /// Collection name.
    pub collection: String,

    /// Force in-memory storage even if a connection string is set.
    pub use_memory: bool,

    /// Upper bound on the initial connection attempt, in milliseconds.
    pub connect_timeout_ms: u64,
}

/// Custom Debug implementation so credentials in the URI never reach logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("uri", &self.uri.as_ref().map(|_| "[REDACTED]"))
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("use_memory", &self.use_memory)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: "todo_db".to_string(),
            collection: "todos".to_string(),
            use_memory: false,
            connect_timeout_ms: 5000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "todo-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            storage: StorageConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`); storage uses `MONGODB_URI`,
    /// `MONGODB_DATABASE`, `MONGODB_COLLECTION`, `MONGODB_TIMEOUT_MS` and
    /// `USE_MEMORY_DB`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.storage = StorageConfig::from_env();

        config
    }
}

impl StorageConfig {
    /// Load storage settings from environment variables.
    pub fn from_env() -> Self {
        let mut storage = Self::default();

        storage.uri = std::env::var("MONGODB_URI")
            .ok()
            .filter(|uri| !uri.trim().is_empty());

        if let Ok(database) = std::env::var("MONGODB_DATABASE") {
            storage.database = database;
        }

        if let Ok(collection) = std::env::var("MONGODB_COLLECTION") {
            storage.collection = collection;
        }

        if let Ok(timeout) = std::env::var("MONGODB_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => storage.connect_timeout_ms = ms,
                Err(_) => warn!(
                    "Ignoring invalid MONGODB_TIMEOUT_MS '{}', using {}ms",
                    timeout, storage.connect_timeout_ms
                ),
            }
        }

        storage.use_memory = std::env::var("USE_MEMORY_DB")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if storage.use_memory {
            info!("USE_MEMORY_DB set - todo items will not be persisted");
        } else if storage.uri.is_none() {
            warn!("MONGODB_URI not set - todo items will not be persisted");
        }

        storage
    }
}
