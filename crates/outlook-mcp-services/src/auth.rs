//! App-only token acquisition.
//!
//! [`ClientCredentialsProvider`] performs the OAuth2 client-credentials grant
//! against the Microsoft identity platform and hands back the bearer token
//! used for Graph calls. A fresh token is requested on every send; nothing is
//! cached.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use outlook_mcp_types::{MailConfig, SecretString};

use crate::endpoint;
use crate::error::{MailError, Result};

/// A bearer token for the mail endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value))
    }

    /// Raw token, for the `Authorization` header only.
    pub fn secret(&self) -> &str {
        self.0.expose()
    }
}

/// Source of bearer tokens for the mail dispatcher.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a token, or fail with [`MailError::Authentication`].
    async fn acquire_token(&self) -> Result<AccessToken>;
}

/// Client-credentials grant against `{authority_host}/{tenant}/oauth2/v2.0/token`.
pub struct ClientCredentialsProvider {
    client: reqwest::Client,
    config: Arc<MailConfig>,
}

impl ClientCredentialsProvider {
    pub fn new(config: Arc<MailConfig>) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Share an existing HTTP client (connection pool) with the provider.
    pub fn with_client(client: reqwest::Client, config: Arc<MailConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsProvider {
    async fn acquire_token(&self) -> Result<AccessToken> {
        let token_url = endpoint::token_url(&self.config)?;
        debug!(tenant = %self.config.tenant_id, "requesting client-credentials token");

        let response = self
            .client
            .post(token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose()),
                ("scope", self.config.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MailError::Http(format!("token request failed: {e}")))?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| {
            MailError::Authentication(format!("failed to parse token response ({status}): {e}"))
        })?;

        if !status.is_success() {
            let error = body
                .get("error_description")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            return Err(MailError::Authentication(format!(
                "token request rejected ({status}): {error}"
            )));
        }

        let token = body["access_token"]
            .as_str()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MailError::Authentication("no access_token in response".into()))?;

        debug!(tenant = %self.config.tenant_id, "access token acquired");
        Ok(AccessToken::new(token))
    }
}
