//! The `send_email` tool.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use outlook_mcp_types::SendRequest;

use super::ToolDefinition;
use super::provider::{CallToolResult, ToolError, ToolProvider};
use crate::mail::GraphMailer;

pub const TOOL_NAME: &str = "send_email";

#[derive(Debug, Deserialize)]
struct SendEmailArgs {
    email_recipient: String,
    email_subject: String,
    email_body: String,
    #[serde(default)]
    attachment_file_path: String,
}

impl From<SendEmailArgs> for SendRequest {
    fn from(args: SendEmailArgs) -> Self {
        SendRequest::new(args.email_recipient, args.email_subject, args.email_body)
            .with_attachment(args.attachment_file_path)
    }
}

/// Serves `send_email` on top of a [`GraphMailer`].
///
/// Both delivery outcomes come back as ordinary text results; only failures
/// to attempt the send (auth, attachment, network) set `isError`.
pub struct SendEmailTool {
    mailer: GraphMailer,
}

impl SendEmailTool {
    pub fn new(mailer: GraphMailer) -> Self {
        Self { mailer }
    }

    fn definition() -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.into(),
            description: "Send an email using the Outlook API. \
                          The message is sent as plain text from the configured mailbox \
                          and saved to its Sent Items."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "email_recipient": {
                        "type": "string",
                        "description": "The recipient's email address."
                    },
                    "email_subject": {
                        "type": "string",
                        "description": "The subject of the email."
                    },
                    "email_body": {
                        "type": "string",
                        "description": "The body content of the email."
                    },
                    "attachment_file_path": {
                        "type": "string",
                        "description": "Optional path of a local file to attach.",
                        "default": ""
                    }
                },
                "required": ["email_recipient", "email_subject", "email_body"]
            }),
        }
    }
}

#[async_trait]
impl ToolProvider for SendEmailTool {
    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![Self::definition()]
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult, ToolError> {
        if name != TOOL_NAME {
            return Err(ToolError::NotFound(name.to_string()));
        }

        let args: SendEmailArgs =
            serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        let request = SendRequest::from(args);

        match self.mailer.send_email(&request).await {
            Ok(outcome) => {
                info!(
                    recipient = %request.recipient,
                    delivered = outcome.is_delivered(),
                    "send_email finished"
                );
                Ok(CallToolResult::text(outcome.to_string()))
            }
            Err(e) => {
                warn!(recipient = %request.recipient, error = %e, "send_email failed");
                Err(ToolError::ExecutionFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use outlook_mcp_types::MailConfig;

    use super::*;
    use crate::auth::{AccessToken, TokenSource};
    use crate::error::{MailError, Result};

    struct FixedToken;

    #[async_trait]
    impl TokenSource for FixedToken {
        async fn acquire_token(&self) -> Result<AccessToken> {
            Ok(AccessToken::new("t"))
        }
    }

    struct RefusedToken;

    #[async_trait]
    impl TokenSource for RefusedToken {
        async fn acquire_token(&self) -> Result<AccessToken> {
            Err(MailError::Authentication("no access_token in response".into()))
        }
    }

    fn tool(server: &mockito::Server, tokens: Arc<dyn TokenSource>) -> SendEmailTool {
        let config = Arc::new(MailConfig {
            sender_email_id: "reports@contoso.com".into(),
            graph_url: server.url(),
            ..Default::default()
        });
        SendEmailTool::new(GraphMailer::new(config, tokens))
    }

    #[tokio::test]
    async fn lists_exactly_one_tool() {
        let server = mockito::Server::new_async().await;
        let tools = tool(&server, Arc::new(FixedToken)).list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "send_email");

        let required = tools[0].input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert!(!required.contains(&json!("attachment_file_path")));
        assert_eq!(
            tools[0].input_schema["properties"]["attachment_file_path"]["default"],
            ""
        );
    }

    #[tokio::test]
    async fn delivered_is_plain_text_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/users/reports@contoso.com/sendMail")
            .with_status(202)
            .create_async()
            .await;

        let result = tool(&server, Arc::new(FixedToken))
            .call_tool(
                "send_email",
                json!({
                    "email_recipient": "a@example.com",
                    "email_subject": "Hi",
                    "email_body": "Hello"
                }),
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.joined_text(), "Email sent successfully to a@example.com.");
    }

    #[tokio::test]
    async fn rejected_is_plain_text_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/users/reports@contoso.com/sendMail")
            .with_status(400)
            .with_body(r#"{"error":"invalid address"}"#)
            .create_async()
            .await;

        let result = tool(&server, Arc::new(FixedToken))
            .call_tool(
                "send_email",
                json!({
                    "email_recipient": "nobody",
                    "email_subject": "Hi",
                    "email_body": "Hello",
                    "attachment_file_path": ""
                }),
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            result.joined_text(),
            r#"Failed to send email: {"error":"invalid address"}"#
        );
    }

    #[tokio::test]
    async fn auth_failure_is_execution_error() {
        let server = mockito::Server::new_async().await;
        let err = tool(&server, Arc::new(RefusedToken))
            .call_tool(
                "send_email",
                json!({
                    "email_recipient": "a@example.com",
                    "email_subject": "Hi",
                    "email_body": "Hello"
                }),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::ExecutionFailed(ref m) if m.contains("access token")));
    }

    #[tokio::test]
    async fn missing_argument_is_invalid() {
        let server = mockito::Server::new_async().await;
        let err = tool(&server, Arc::new(FixedToken))
            .call_tool("send_email", json!({"email_recipient": "a@example.com"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let server = mockito::Server::new_async().await;
        let err = tool(&server, Arc::new(FixedToken))
            .call_tool("read_inbox", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref n) if n == "read_inbox"));
    }
}
