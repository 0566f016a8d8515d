//! Error taxonomy for report generation.
//!
//! Only run-level failures live here. Per-file and per-line problems
//! (unreadable sources, paths that cannot be made relative) degrade to
//! sentinel text or absolute paths and never surface as an `Error`.

use std::path::PathBuf;

/// Longest slice of a raw payload echoed back in an error message.
const PAYLOAD_EXCERPT: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("language not supported: '{key}' (supported: {})", .supported.join(", "))]
    UnsupportedEcosystem { key: String, supported: Vec<String> },

    #[error("could not decode {ecosystem} diagnostics: {source}. Raw payload: {}", excerpt(.payload))]
    Decode {
        ecosystem: String,
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("executable '{program}' could not be started: {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("empty command line")]
    EmptyCommand,

    #[error("invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Truncate `payload` on a char boundary for display.
pub fn excerpt(payload: &str) -> String {
    let trimmed = payload.trim();
    if trimmed.len() <= PAYLOAD_EXCERPT {
        return trimmed.to_string();
    }
    let mut end = PAYLOAD_EXCERPT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}… ({} bytes total)", &trimmed[..end], trimmed.len())
}
