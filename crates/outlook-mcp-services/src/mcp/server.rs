//! MCP server shell over newline-delimited JSON-RPC.
//!
//! [`McpServerShell`] is generic over `AsyncBufRead + AsyncWrite` so it can
//! be driven by stdio in production and by in-memory buffers in tests.
//! Requests are handled one at a time, in arrival order.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::MCP_PROTOCOL_VERSION;
use super::provider::{CallToolResult, ToolProvider};

const SERVER_NAME: &str = "outlook-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC error codes.
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const NOT_INITIALIZED: i32 = -32002;

/// Reads JSON-RPC lines from a reader and writes one response line per
/// request to a writer.
///
/// Notifications (messages without an `id`) never get a response. Anything
/// other than `initialize` and `ping` sent before `initialize` is rejected
/// with `-32002`.
pub struct McpServerShell {
    provider: Box<dyn ToolProvider>,
    initialized: bool,
}

impl McpServerShell {
    pub fn new(provider: Box<dyn ToolProvider>) -> Self {
        Self {
            provider,
            initialized: false,
        }
    }

    /// Serve until `reader` reaches EOF.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            // Raw bytes, so a non-UTF-8 line is a parse error, not an I/O error.
            let msg: Value = match serde_json::from_slice(line) {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = %e, "unparsable JSON-RPC line");
                    let resp = make_error_response(Value::Null, PARSE_ERROR, "Parse error");
                    write_response(&mut writer, &resp).await?;
                    continue;
                }
            };

            if !msg.is_object() {
                warn!("JSON-RPC message is not an object");
                let resp = make_error_response(Value::Null, INVALID_REQUEST, "Invalid Request");
                write_response(&mut writer, &resp).await?;
                continue;
            }

            let method = msg.get("method").and_then(|v| v.as_str()).unwrap_or("");
            let params = msg
                .get("params")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()));
            debug!(method, "received message");

            // Notifications have no id.
            let Some(id) = msg.get("id").cloned() else {
                if method == "notifications/initialized" {
                    debug!("client finished initialization");
                }
                continue;
            };

            let resp = match method {
                "initialize" => {
                    self.initialized = true;
                    make_success_response(
                        id,
                        serde_json::json!({
                            "protocolVersion": MCP_PROTOCOL_VERSION,
                            "capabilities": {
                                "tools": { "listChanged": false }
                            },
                            "serverInfo": {
                                "name": SERVER_NAME,
                                "version": SERVER_VERSION
                            }
                        }),
                    )
                }

                "ping" => make_success_response(id, serde_json::json!({})),

                _ if !self.initialized => {
                    make_error_response(id, NOT_INITIALIZED, "Server not initialized")
                }

                "tools/list" => {
                    let tools = serde_json::to_value(self.provider.list_tools())
                        .unwrap_or_else(|_| Value::Array(vec![]));
                    make_success_response(id, serde_json::json!({ "tools": tools }))
                }

                "tools/call" => {
                    let result = self.call_tool(&params).await;
                    make_success_response(
                        id,
                        serde_json::to_value(&result).unwrap_or(Value::Null),
                    )
                }

                _ => make_error_response(
                    id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {method}"),
                ),
            };

            write_response(&mut writer, &resp).await?;
        }

        debug!("input closed, MCP server exiting");
        Ok(())
    }

    async fn call_tool(&self, params: &Value) -> CallToolResult {
        let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        match self.provider.call_tool(name, args).await {
            Ok(result) => result,
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }
}

fn make_success_response(id: Value, result: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn make_error_response(id: Value, code: i32, message: &str) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Value,
) -> std::io::Result<()> {
    let mut line = serde_json::to_string(response).map_err(std::io::Error::other)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
