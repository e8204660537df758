//! Graph mail dispatcher.
//!
//! [`GraphMailer`] runs one send end to end: token, attachment, payload,
//! POST. Every call fetches a fresh token and issues exactly one `sendMail`
//! request. A non-202 answer is returned as
//! [`DeliveryOutcome::Rejected`] rather than an error.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use outlook_mcp_types::{DeliveryOutcome, MailConfig, SendRequest};

use super::attachment::{Attachment, normalize_attachment_path};
use super::payload::SendMailPayload;
use crate::auth::{ClientCredentialsProvider, TokenSource};
use crate::endpoint;
use crate::error::{MailError, Result};

/// Sends mail from the configured mailbox.
pub struct GraphMailer {
    client: reqwest::Client,
    config: Arc<MailConfig>,
    tokens: Arc<dyn TokenSource>,
}

impl GraphMailer {
    pub fn new(config: Arc<MailConfig>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            tokens,
        }
    }

    /// Mailer backed by the client-credentials grant, sharing one HTTP client
    /// between the token and mail calls.
    pub fn from_config(config: Arc<MailConfig>) -> Self {
        let client = reqwest::Client::new();
        let tokens = Arc::new(ClientCredentialsProvider::with_client(
            client.clone(),
            config.clone(),
        ));
        Self {
            client,
            config,
            tokens,
        }
    }

    pub async fn send_email(&self, request: &SendRequest) -> Result<DeliveryOutcome> {
        let token = self.tokens.acquire_token().await?;

        let attachment = match request.attachment().and_then(normalize_attachment_path) {
            Some(path) => Some(Attachment::load(&path).await?),
            None => None,
        };
        let payload = SendMailPayload::build(request, attachment);
        let body = serde_json::to_vec(&payload)?;

        let url = endpoint::send_mail_url(&self.config)?;
        debug!(
            recipient = %request.recipient,
            attachments = payload.message.attachments.len(),
            "posting sendMail"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(token.secret())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| MailError::Http(format!("sendMail request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::ACCEPTED {
            info!(recipient = %request.recipient, "email accepted");
            return Ok(DeliveryOutcome::Delivered {
                recipient: request.recipient.clone(),
            });
        }

        let detail = response
            .text()
            .await
            .map_err(|e| MailError::Http(format!("failed to read sendMail response: {e}")))?;
        warn!(
            recipient = %request.recipient,
            status = status.as_u16(),
            "email rejected"
        );
        Ok(DeliveryOutcome::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
