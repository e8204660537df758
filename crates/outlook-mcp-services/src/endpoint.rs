//! Identity and Graph endpoint URLs.
//!
//! Tenant and mailbox ids are appended as path segments, so characters such
//! as `#`, `?` or `/` are percent-encoded instead of changing the URL shape.

use reqwest::Url;

use outlook_mcp_types::MailConfig;

use crate::error::{MailError, Result};

/// `{authority_host}/{tenant}/oauth2/v2.0/token`
pub fn token_url(config: &MailConfig) -> Result<Url> {
    join_segments(
        &config.authority_host,
        &[config.tenant_id.as_str(), "oauth2", "v2.0", "token"],
    )
}

/// `{graph_url}/users/{sender}/sendMail`
pub fn send_mail_url(config: &MailConfig) -> Result<Url> {
    join_segments(
        &config.graph_url,
        &["users", config.sender_email_id.as_str(), "sendMail"],
    )
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| MailError::Endpoint(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| MailError::Endpoint(format!("{base}: cannot append path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
