//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST. Every request is answered on its own; the
//! todo store is shared with the other transports through [`McpServer`].

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;
use crate::domains::tools::ToolError;

/// Protocol revision answered to `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, -32601, format!("Method not found: {}", method))
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Map a tool dispatch failure onto its JSON-RPC error code.
    fn from_tool_error(id: Option<Value>, error: ToolError) -> Self {
        match error {
            ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
                Self::invalid_params(id, error.to_string())
            }
            ToolError::Internal(_) => Self::internal_error(id, error.to_string()),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        app
    }

    /// Serve until the task is cancelled or the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let name = server.name().to_string();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "{} listening on {} (JSON-RPC at POST {}, CORS {})",
            name,
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "health": "/health"
        }
    }))
}

async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    let backend = server
        .store()
        .backend_kind()
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "unselected".to_string());

    Json(json!({
        "status": "healthy",
        "backend": backend,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    let response = process_request(&server, request).await;
    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => initialize(server, request.id),
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => JsonRpcResponse::success(request.id, json!({ "tools": server.list_tools() })),
        "tools/call" => call_tool(server, request).await,
        method if method.starts_with("notifications/") => {
            debug!("Ignoring notification {}", method);
            JsonRpcResponse::success(request.id, Value::Null)
        }
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(request.id, method)
        }
    }
}

fn initialize(server: &McpServer, id: Option<Value>) -> JsonRpcResponse {
    info!("Client initialized over HTTP");
    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": server.name(),
                "version": server.version()
            },
            "instructions": INSTRUCTIONS
        }),
    )
}

async fn call_tool(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::invalid_params(request.id, "Missing params");
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::invalid_params(request.id, "Missing tool name");
    };
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.call_tool(name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::from_tool_error(request.id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::todos::TodoStore;
    use std::sync::Arc;

    fn server() -> McpServer {
        McpServer::with_store(Config::default(), Arc::new(TodoStore::in_memory()))
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_advertises_tools_only() {
        let response = process_request(&server(), request("initialize", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"].get("resources").is_none());
    }

    #[tokio::test]
    async fn test_add_then_list_over_rpc() {
        let server = server();
        let add = process_request(
            &server,
            request(
                "tools/call",
                Some(json!({ "name": "add_todo", "arguments": { "title": "Water plants" } })),
            ),
        )
        .await;
        assert!(add.error.is_none());
        assert_eq!(add.result.unwrap()["isError"], false);

        let list = process_request(
            &server,
            request("tools/call", Some(json!({ "name": "get_all_todos" }))),
        )
        .await;
        let result = list.result.unwrap();
        assert_eq!(result["structuredContent"]["count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = process_request(
            &server(),
            request("tools/call", Some(json!({ "name": "launch_rocket" }))),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Unknown tool: launch_rocket");
    }

    #[tokio::test]
    async fn test_unknown_method_and_bad_version() {
        let server = server();
        let missing = process_request(&server, request("resources/list", None)).await;
        assert_eq!(missing.error.unwrap().code, -32601);

        let mut old = request("ping", None);
        old.jsonrpc = "1.0".to_string();
        let invalid = process_request(&server, old).await;
        assert_eq!(invalid.error.unwrap().code, -32600);
    }
}
