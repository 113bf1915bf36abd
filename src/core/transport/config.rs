//! Transport configuration types.

use serde::{Deserialize, Serialize};
#[cfg(any(feature = "tcp", feature = "http"))]
use std::str::FromStr;
#[cfg(any(feature = "tcp", feature = "http"))]
use tracing::warn;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

/// Read `key` and parse it, falling back to `default` when unset or invalid.
#[cfg(any(feature = "tcp", feature = "http"))]
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}='{}'", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: default_host(),
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("MCP_TCP_PORT", defaults.port),
            host: env_or("MCP_TCP_HOST", defaults.host),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| !v.eq_ignore_ascii_case("false") && v != "0")
            .unwrap_or(defaults.enable_cors);
        Self {
            port: env_or("MCP_HTTP_PORT", defaults.port),
            host: env_or("MCP_HTTP_HOST", defaults.host),
            rpc_path: env_or("MCP_HTTP_PATH", defaults.rpc_path),
            enable_cors,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            Self::Tcp(TcpConfig::default())
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

impl TransportConfig {
    /// Load transport config from `MCP_TRANSPORT` and the matching
    /// `MCP_TCP_*` / `MCP_HTTP_*` variables.
    ///
    /// Unknown or disabled transports fall back to the default.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[cfg(feature = "stdio")]
    #[test]
    fn test_unknown_transport_uses_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "carrier-pigeon");
        }
        let config = TransportConfig::from_env();
        assert!(matches!(config, TransportConfig::Stdio));
        assert_eq!(config.description(), "STDIO (standard MCP mode)");
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_from_env_ignores_bad_port() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "TCP");
            std::env::set_var("MCP_TCP_PORT", "not-a-port");
            std::env::set_var("MCP_TCP_HOST", "0.0.0.0");
        }
        match TransportConfig::from_env() {
            TransportConfig::Tcp(cfg) => {
                assert_eq!(cfg.port, 3000);
                assert_eq!(cfg.host, "0.0.0.0");
            }
            other => panic!("expected tcp, got {:?}", other),
        }
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
            std::env::remove_var("MCP_TCP_PORT");
            std::env::remove_var("MCP_TCP_HOST");
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "http");
            std::env::set_var("MCP_HTTP_PORT", "9090");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }
        match TransportConfig::from_env() {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 9090);
                assert_eq!(cfg.rpc_path, "/mcp");
                assert!(!cfg.enable_cors);
            }
            other => panic!("expected http, got {:?}", other),
        }
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::remove_var("MCP_HTTP_CORS");
        }
    }
}
