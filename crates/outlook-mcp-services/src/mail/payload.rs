//! Graph `sendMail` request body.

use serde::Serialize;

use outlook_mcp_types::SendRequest;

use super::attachment::Attachment;

const FILE_ATTACHMENT_ODATA_TYPE: &str = "#microsoft.graph.fileAttachment";

/// Top-level body of `POST /users/{id}/sendMail`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailPayload {
    pub message: Message,
    /// Graph accepts the string form; kept as `"true"` on the wire.
    pub save_to_sent_items: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub subject: String,
    pub body: ItemBody,
    pub to_recipients: Vec<Recipient>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<FileAttachment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAddress {
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    pub name: String,
    pub content_type: String,
    pub content_bytes: String,
}

impl From<Attachment> for FileAttachment {
    fn from(att: Attachment) -> Self {
        Self {
            odata_type: FILE_ATTACHMENT_ODATA_TYPE,
            name: att.name,
            content_type: att.content_type.to_string(),
            content_bytes: att.content_bytes,
        }
    }
}

impl SendMailPayload {
    /// Plain-text message to a single recipient, saved to Sent Items.
    pub fn build(request: &SendRequest, attachment: Option<Attachment>) -> Self {
        Self {
            message: Message {
                subject: request.subject.clone(),
                body: ItemBody {
                    content_type: "Text",
                    content: request.body.clone(),
                },
                to_recipients: vec![Recipient {
                    email_address: EmailAddress {
                        address: request.recipient.clone(),
                    },
                }],
                attachments: attachment.into_iter().map(FileAttachment::from).collect(),
            },
            save_to_sent_items: "true",
        }
    }
}
