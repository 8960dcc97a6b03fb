//! MCP serving glue
//!
//! A minimal JSON-RPC 2.0 loop over stdio (protocol version 2024-11-05):
//! `initialize`, `ping`, `tools/list`, and `tools/call`, with notifications
//! ignored. One request per line in, one response per line out; stdout
//! belongs to the protocol, so all logging goes through the log file. All
//! domain behavior stays behind the tool registry.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::tools::ToolRegistry;

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(error),
            id,
        }
    }

    #[cfg(test)]
    fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    #[cfg(test)]
    fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|e| e.code)
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    code: i64,
    message: String,
}

impl JsonRpcError {
    fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("method not found: {}", method),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }
}

/// Stdio MCP server over the standard tool registry
pub struct McpServer {
    fetcher: Fetcher,
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            registry: ToolRegistry::standard(),
        }
    }

    /// Serve until stdin closes
    pub async fn run(&self) -> Result<()> {
        log::info!("MCP server listening on stdio");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(line).await else {
                continue;
            };
            let mut body = serde_json::to_string(&response)?;
            body.push('\n');
            stdout.write_all(body.as_bytes()).await?;
            stdout.flush().await?;
        }

        log::info!("stdin closed, MCP server exiting");
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                log::warn!("unparseable request: {}", e);
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError {
                        code: PARSE_ERROR,
                        message: format!("parse error: {}", e),
                    },
                ))
            }
        }
    }

    /// Handle one request; `None` means no response is owed (notification)
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.method.starts_with("notifications/") {
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(&request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    async fn call_tool(&self, params: &Value) -> std::result::Result<Value, JsonRpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("missing tool name"))?;

        if !self.registry.has_tool(name) {
            return Err(JsonRpcError::invalid_params(format!("unknown tool: {}", name)));
        }

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        log::info!("tools/call {} {}", name, arguments);

        let result = self.registry.execute(name, arguments, &self.fetcher).await;
        Ok(json!({
            "content": [{ "type": "text", "text": result.payload.to_string() }],
            "isError": result.is_error,
        }))
    }
}
