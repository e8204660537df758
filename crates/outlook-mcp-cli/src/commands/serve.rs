//! `outlook-mcp serve`: run the MCP server over stdio.
//!
//! The MCP host launches this process, writes JSON-RPC requests to its stdin
//! and reads responses from its stdout. The server exits when stdin closes.

use std::sync::Arc;

use tokio::io::{BufReader, stdin, stdout};
use tracing::info;

use outlook_mcp_services::mail::GraphMailer;
use outlook_mcp_services::mcp::{McpServerShell, SendEmailTool};
use outlook_mcp_types::MailConfig;

pub async fn run(config: MailConfig) -> anyhow::Result<()> {
    info!(sender = %config.sender_email_id, "starting outlook-mcp server on stdio");

    let mailer = GraphMailer::from_config(Arc::new(config));
    let mut shell = McpServerShell::new(Box::new(SendEmailTool::new(mailer)));

    shell.run(BufReader::new(stdin()), stdout()).await?;

    info!("outlook-mcp server stopped");
    Ok(())
}
