//! Service error types.

use std::path::PathBuf;

use thiserror::Error;

/// Infrastructure failures of a send.
///
/// A message the provider *rejected* is not an error; it is
/// [`DeliveryOutcome::Rejected`](outlook_mcp_types::DeliveryOutcome::Rejected).
/// Everything here means the send could not be attempted or completed and is
/// surfaced to the MCP host as a tool error.
#[derive(Error, Debug)]
pub enum MailError {
    /// The identity provider did not hand out an access token (expired
    /// secret, wrong tenant, missing app permissions).
    #[error("could not obtain access token: {0}")]
    Authentication(String),

    /// The attachment could not be read.
    #[error("cannot read attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured base URL cannot be turned into an endpoint.
    #[error("invalid endpoint url {0}")]
    Endpoint(String),

    /// Transport failure talking to the identity or mail endpoint.
    #[error("http error: {0}")]
    Http(String),

    /// Payload serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::Http(err.to_string())
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, MailError>;
