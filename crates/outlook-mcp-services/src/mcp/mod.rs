//! MCP tool surface.
//!
//! The server speaks newline-delimited JSON-RPC 2.0 (the MCP stdio
//! transport). [`server::McpServerShell`] owns the protocol;
//! [`send_email::SendEmailTool`] is the only tool it serves.

pub mod provider;
pub mod send_email;
pub mod server;

use serde::{Deserialize, Serialize};

/// MCP protocol revision advertised during `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

/// A tool as listed by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema", alias = "input_schema")]
    pub input_schema: serde_json::Value,
}

pub use provider::{CallToolResult, ContentBlock, ToolError, ToolProvider};
pub use send_email::SendEmailTool;
pub use server::McpServerShell;
