//! Subcommand implementations and shared config loading.

pub mod send;
pub mod serve;
pub mod status;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use outlook_mcp_types::MailConfig;

/// Resolve configuration: defaults, then the optional file, then the
/// environment. Missing required values are logged, not fatal.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<MailConfig> {
    resolve_config(path, |key| std::env::var(key).ok())
}

fn resolve_config<F>(path: Option<&Path>, lookup: F) -> anyhow::Result<MailConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => {
            debug!(path = %p.display(), "loading config file");
            MailConfig::from_json_file(p)
                .with_context(|| format!("failed to load config from {}", p.display()))?
        }
        None => MailConfig::default(),
    };
    config.apply_overrides_from(lookup);

    for field in config.missing_fields() {
        warn!(field, "required setting is not configured");
    }
    Ok(config)
}
