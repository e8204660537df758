//! # outlook-mcp-types
//!
//! Shared type definitions for the outlook-mcp workspace.
//!
//! - **[`config`]** -- [`MailConfig`]: app-only Graph credentials and endpoints
//! - **[`secret`]** -- [`SecretString`] for values that must never be logged
//! - **[`mail`]** -- [`SendRequest`] and [`DeliveryOutcome`]
//! - **[`error`]** -- [`ConfigError`]

pub mod config;
pub mod error;
pub mod mail;
pub mod secret;

pub use config::MailConfig;
pub use error::ConfigError;
pub use mail::{DeliveryOutcome, SendRequest};
pub use secret::SecretString;
