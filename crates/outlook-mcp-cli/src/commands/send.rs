//! `outlook-mcp send`: one-shot send from a terminal.
//!
//! Uses the same dispatcher as the MCP tool. Prints the result line; a
//! rejected message still exits zero, infrastructure failures do not.

use std::sync::Arc;

use clap::Args;

use outlook_mcp_services::mail::GraphMailer;
use outlook_mcp_types::{MailConfig, SendRequest};

#[derive(Args)]
pub struct SendArgs {
    /// Recipient address.
    #[arg(long)]
    pub to: String,

    #[arg(long)]
    pub subject: String,

    /// Plain-text body.
    #[arg(long)]
    pub body: String,

    /// Local file to attach.
    #[arg(long)]
    pub attachment: Option<String>,
}

impl From<SendArgs> for SendRequest {
    fn from(args: SendArgs) -> Self {
        let request = SendRequest::new(args.to, args.subject, args.body);
        match args.attachment {
            Some(path) => request.with_attachment(path),
            None => request,
        }
    }
}

pub async fn run(args: SendArgs, config: MailConfig) -> anyhow::Result<()> {
    let mailer = GraphMailer::from_config(Arc::new(config));
    let outcome = mailer.send_email(&SendRequest::from(args)).await?;
    println!("{outcome}");
    Ok(())
}
