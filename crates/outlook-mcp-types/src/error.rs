//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a [`MailConfig`](crate::MailConfig) file.
///
/// Missing credential values are not an error here; see
/// [`MailConfig::missing_fields`](crate::MailConfig::missing_fields).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`MailConfig`](crate::MailConfig).
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
