//! Outbound mail through Microsoft Graph.

pub mod attachment;
pub mod dispatcher;
pub mod payload;

pub use attachment::{Attachment, mime_type_for, normalize_attachment_path};
pub use dispatcher::GraphMailer;
pub use payload::SendMailPayload;
