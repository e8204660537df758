//! Services for outlook-mcp.
//!
//! - [`auth`] acquires app-only bearer tokens (client-credentials grant).
//! - [`endpoint`] builds the token and `sendMail` URLs from configuration.
//! - [`mail`] turns a [`SendRequest`](outlook_mcp_types::SendRequest) into a
//!   Graph `sendMail` call, including attachment encoding.
//! - [`mcp`] exposes `send_email` as an MCP tool over newline-delimited
//!   JSON-RPC.

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod mail;
pub mod mcp;

pub use error::{MailError, Result};
