//! Per-invocation mail types.

use std::fmt;

/// One outbound message, built from caller-supplied arguments.
///
/// The recipient is not validated locally; Graph rejects malformed
/// addresses and the rejection comes back as [`DeliveryOutcome::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub recipient: String,
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Raw attachment path as supplied by the caller. Blank means none.
    pub attachment_path: Option<String>,
}

impl SendRequest {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            attachment_path: None,
        }
    }

    pub fn with_attachment(mut self, path: impl Into<String>) -> Self {
        self.attachment_path = Some(path.into());
        self
    }

    /// The attachment path, or `None` when absent or whitespace-only.
    pub fn attachment(&self) -> Option<&str> {
        self.attachment_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

/// What the mail endpoint said about a send.
///
/// Both variants are normal results. Failures to reach the endpoint at all
/// (auth, I/O, network) are errors, not outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Graph answered `202 Accepted`.
    Delivered { recipient: String },
    /// Graph answered anything else; `detail` is the raw response body.
    Rejected { status: u16, detail: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered { recipient } => {
                write!(f, "Email sent successfully to {recipient}.")
            }
            DeliveryOutcome::Rejected { detail, .. } => {
                write!(f, "Failed to send email: {detail}")
            }
        }
    }
}
