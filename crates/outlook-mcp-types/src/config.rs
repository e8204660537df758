//! Mailbox and identity configuration.
//!
//! [`MailConfig`] is resolved once at startup and shared read-only by the
//! token provider and the mail dispatcher. Resolution order, lowest to
//! highest priority:
//!
//! 1. Compiled-in defaults ([`MailConfig::default`])
//! 2. An optional JSON file ([`MailConfig::from_json_file`])
//! 3. Environment variables ([`MailConfig::apply_overrides_from`] with an
//!    environment lookup)
//!
//! Missing credentials are not rejected. They are reported by
//! [`MailConfig::missing_fields`] and otherwise surface downstream as
//! authentication or request failures.
//!
//! # Example file
//!
//! ```json
//! {
//!   "senderEmailId": "reports@contoso.com",
//!   "tenantId": "00000000-0000-0000-0000-000000000000",
//!   "clientId": "11111111-1111-1111-1111-111111111111",
//!   "clientSecret": "..."
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::secret::SecretString;

pub const ENV_SENDER_EMAIL_ID: &str = "SENDER_EMAIL_ID";
pub const ENV_TENANT_ID: &str = "TENANT_ID";
pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_GRAPH_SCOPE: &str = "GRAPH_SCOPE";
pub const ENV_AUTHORITY_HOST: &str = "AUTHORITY_HOST";
pub const ENV_GRAPH_URL: &str = "GRAPH_URL";

/// App-only credentials plus the endpoints they are used against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mailbox (UPN or object id) that messages are sent from.
    #[serde(default, alias = "senderEmailId")]
    pub sender_email_id: String,

    /// Azure AD tenant id.
    #[serde(default, alias = "tenantId")]
    pub tenant_id: String,

    /// Application (client) id.
    #[serde(default, alias = "clientId")]
    pub client_id: String,

    /// Application secret.
    #[serde(default, alias = "clientSecret")]
    pub client_secret: SecretString,

    /// Scope requested in the client-credentials grant.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Identity platform host; the tenant id is appended as a path segment.
    #[serde(default = "default_authority_host", alias = "authorityHost")]
    pub authority_host: String,

    /// Microsoft Graph base URL including the API version.
    #[serde(default = "default_graph_url", alias = "graphUrl")]
    pub graph_url: String,
}

fn default_scope() -> String {
    "https://graph.microsoft.com/.default".into()
}

fn default_authority_host() -> String {
    "https://login.microsoftonline.com".into()
}

fn default_graph_url() -> String {
    "https://graph.microsoft.com/v1.0".into()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender_email_id: String::new(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: SecretString::default(),
            scope: default_scope(),
            authority_host: default_authority_host(),
            graph_url: default_graph_url(),
        }
    }
}

impl MailConfig {
    /// Load a JSON config file. Unknown keys are ignored.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides keyed by environment variable name, usually
    /// `|key| std::env::var(key).ok()`. Empty values are treated as unset and
    /// leave the current value in place.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_SENDER_EMAIL_ID) {
            self.sender_email_id = v;
        }
        if let Some(v) = get(ENV_TENANT_ID) {
            self.tenant_id = v;
        }
        if let Some(v) = get(ENV_CLIENT_ID) {
            self.client_id = v;
        }
        if let Some(v) = get(ENV_CLIENT_SECRET) {
            self.client_secret = SecretString::new(v);
        }
        if let Some(v) = get(ENV_GRAPH_SCOPE) {
            self.scope = v;
        }
        if let Some(v) = get(ENV_AUTHORITY_HOST) {
            self.authority_host = v;
        }
        if let Some(v) = get(ENV_GRAPH_URL) {
            self.graph_url = v;
        }
    }

    /// Environment variable names of required values that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.sender_email_id.is_empty() {
            missing.push(ENV_SENDER_EMAIL_ID);
        }
        if self.tenant_id.is_empty() {
            missing.push(ENV_TENANT_ID);
        }
        if self.client_id.is_empty() {
            missing.push(ENV_CLIENT_ID);
        }
        if self.client_secret.is_empty() {
            missing.push(ENV_CLIENT_SECRET);
        }
        missing
    }
}
