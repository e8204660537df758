//! Attachment path handling and encoding.
//!
//! Paths arrive from an MCP host, often pasted by a user: quoted, with
//! Windows separators, or relative to wherever the server was launched.
//! [`normalize_attachment_path`] turns them into a clean absolute path
//! without touching the filesystem; [`Attachment::load`] then reads and
//! base64-encodes the file.

use std::path::{Component, Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::{MailError, Result};

/// Clean a caller-supplied attachment path.
///
/// Returns `None` when the input is blank once whitespace and quotes are
/// stripped. Relative paths are resolved against the current directory.
/// `.` and `..` are resolved lexically; symlinks are left alone.
pub fn normalize_attachment_path(raw: &str) -> Option<PathBuf> {
    let base = std::env::current_dir().unwrap_or_default();
    normalize_against(raw, &base)
}

fn normalize_against(raw: &str, base: &Path) -> Option<PathBuf> {
    let trimmed = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    if trimmed.is_empty() {
        return None;
    }

    let unified = trimmed.replace('\\', "/");
    let candidate = Path::new(&unified);
    let absolute = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    };
    Some(resolve_dots(&absolute))
}

fn resolve_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` above the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// MIME type for a file, from its extension. Unknown or missing extensions
/// map to `application/octet-stream`.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "htm" | "html" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "ics" => "text/calendar",
        "eml" => "message/rfc822",
        _ => "application/octet-stream",
    }
}

/// A file read from disk, ready to embed in a Graph message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Display name (basename).
    pub name: String,
    pub content_type: &'static str,
    /// Standard, padded base64 of the file contents.
    pub content_bytes: String,
}

impl Attachment {
    /// Read and encode the file at an already-normalized path.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| MailError::Attachment {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".into());
        let content_type = mime_type_for(path);

        debug!(
            path = %path.display(),
            size = bytes.len(),
            content_type,
            "attachment loaded"
        );

        Ok(Self {
            name,
            content_type,
            content_bytes: STANDARD.encode(&bytes),
        })
    }
}
