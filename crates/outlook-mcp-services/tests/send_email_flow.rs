//! Drives the MCP shell end to end: JSON-RPC in, token grant and sendMail
//! against mock endpoints, JSON-RPC out.

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use mockito::Matcher;
use serde_json::{Value, json};

use outlook_mcp_services::mail::GraphMailer;
use outlook_mcp_services::mcp::{McpServerShell, SendEmailTool};
use outlook_mcp_types::{MailConfig, SecretString};

const TOKEN_PATH: &str = "/tenant-1/oauth2/v2.0/token";
const SEND_PATH: &str = "/users/reports@contoso.com/sendMail";

fn config_for(server: &mockito::Server) -> Arc<MailConfig> {
    Arc::new(MailConfig {
        sender_email_id: "reports@contoso.com".into(),
        tenant_id: "tenant-1".into(),
        client_id: "client-1".into(),
        client_secret: SecretString::new("s3cret"),
        authority_host: server.url(),
        graph_url: server.url(),
        ..Default::default()
    })
}

fn line(value: Value) -> String {
    format!("{}\n", serde_json::to_string(&value).unwrap())
}

fn session(calls: &[Value]) -> String {
    let mut input = line(json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {"name": "flow-test", "version": "1.0"}
        }
    }));
    input.push_str(&line(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})));
    for (i, args) in calls.iter().enumerate() {
        input.push_str(&line(json!({
            "jsonrpc": "2.0",
            "id": i + 1,
            "method": "tools/call",
            "params": {"name": "send_email", "arguments": args}
        })));
    }
    input
}

async fn serve(config: Arc<MailConfig>, input: String) -> Vec<Value> {
    let tool = SendEmailTool::new(GraphMailer::from_config(config));
    let mut shell = McpServerShell::new(Box::new(tool));
    let mut output = Vec::new();
    shell
        .run(Cursor::new(input.into_bytes()), &mut output)
        .await
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

async fn mock_token(server: &mut mockito::Server, hits: usize) -> mockito::Mock {
    server
        .mock("POST", TOKEN_PATH)
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token_type":"Bearer","expires_in":3599,"access_token":"flow-token"}"#)
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn plain_send_is_delivered() {
    let mut server = mockito::Server::new_async().await;
    let token = mock_token(&mut server, 1).await;
    let send = server
        .mock("POST", SEND_PATH)
        .match_header("authorization", "Bearer flow-token")
        .match_body(Matcher::Json(json!({
            "message": {
                "subject": "Hi",
                "body": {"contentType": "Text", "content": "Hello"},
                "toRecipients": [{"emailAddress": {"address": "a@example.com"}}]
            },
            "saveToSentItems": "true"
        })))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;

    let responses = serve(
        config_for(&server),
        session(&[json!({
            "email_recipient": "a@example.com",
            "email_subject": "Hi",
            "email_body": "Hello"
        })]),
    )
    .await;

    assert_eq!(responses.len(), 2);
    let result = &responses[1]["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(
        result["content"][0]["text"],
        "Email sent successfully to a@example.com."
    );
    token.assert_async().await;
    send.assert_async().await;
}

#[tokio::test]
async fn quoted_attachment_path_is_sent_as_file_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let bytes = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n";
    std::fs::write(&path, bytes).unwrap();

    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server, 1).await;
    let send = server
        .mock("POST", SEND_PATH)
        .match_body(Matcher::PartialJson(json!({
            "message": {
                "toRecipients": [{"emailAddress": {"address": "a@example.com"}}],
                "attachments": [{
                    "@odata.type": "#microsoft.graph.fileAttachment",
                    "name": "report.pdf",
                    "contentType": "application/pdf",
                    "contentBytes": base64::engine::general_purpose::STANDARD.encode(bytes)
                }]
            }
        })))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;

    let responses = serve(
        config_for(&server),
        session(&[json!({
            "email_recipient": "a@example.com",
            "email_subject": "Q3 report",
            "email_body": "See attached.",
            "attachment_file_path": format!("\"{}\"", path.display())
        })]),
    )
    .await;

    assert_eq!(responses[1]["result"]["isError"], false);
    send.assert_async().await;
}

#[tokio::test]
async fn rejection_reports_raw_body() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server, 1).await;
    let _send = server
        .mock("POST", SEND_PATH)
        .with_status(400)
        .with_body(r#"{"error":"invalid address"}"#)
        .create_async()
        .await;

    let responses = serve(
        config_for(&server),
        session(&[json!({
            "email_recipient": "not an address",
            "email_subject": "Hi",
            "email_body": "Hello"
        })]),
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(
        result["content"][0]["text"],
        r#"Failed to send email: {"error":"invalid address"}"#
    );
}

#[tokio::test]
async fn missing_token_never_reaches_mail_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let token = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token_type":"Bearer"}"#)
        .expect(1)
        .create_async()
        .await;
    let send = server
        .mock("POST", SEND_PATH)
        .with_status(202)
        .expect(0)
        .create_async()
        .await;

    let responses = serve(
        config_for(&server),
        session(&[json!({
            "email_recipient": "a@example.com",
            "email_subject": "Hi",
            "email_body": "Hello"
        })]),
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("could not obtain access token")
    );
    token.assert_async().await;
    send.assert_async().await;
}

#[tokio::test]
async fn every_call_fetches_a_fresh_token() {
    let mut server = mockito::Server::new_async().await;
    let token = mock_token(&mut server, 2).await;
    let send = server
        .mock("POST", SEND_PATH)
        .with_status(202)
        .expect(2)
        .create_async()
        .await;

    let args = json!({
        "email_recipient": "a@example.com",
        "email_subject": "Hi",
        "email_body": "Hello"
    });
    let responses = serve(config_for(&server), session(&[args.clone(), args])).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[2]["id"], 2);
    token.assert_async().await;
    send.assert_async().await;
}

#[tokio::test]
async fn bad_arguments_are_tool_errors() {
    let server = mockito::Server::new_async().await;
    let responses = serve(
        config_for(&server),
        session(&[json!({"email_recipient": "a@example.com"})]),
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("invalid arguments")
    );
}
