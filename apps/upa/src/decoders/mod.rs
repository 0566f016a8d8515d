//! Per-ecosystem diagnostic decoders.
//!
//! Each adapter understands one tool's JSON schema and maps it onto
//! [`Issue`], reconciling every reported path against the project root.
//! Adapters are pure; they never run a tool themselves.

mod dart;
mod golangci;
mod ruff;

use crate::error::{Error, Result};
use crate::models::Issue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which JSON schema a tool emits.
pub enum DecoderKind {
    /// golangci-lint `--output.json.path stdout`
    Golangci,
    /// ruff `--output-format=json`
    Ruff,
    /// `dart analyze --format=json`
    Dart,
}

impl DecoderKind {
    pub fn name(self) -> &'static str {
        match self {
            DecoderKind::Golangci => "golangci",
            DecoderKind::Ruff => "ruff",
            DecoderKind::Dart => "dart",
        }
    }

    /// Decode a raw payload. `ecosystem` only labels a failure.
    pub fn decode(self, ecosystem: &str, payload: &str, root: &str) -> Result<Vec<Issue>> {
        let decoded = match self {
            DecoderKind::Golangci => golangci::decode(payload, root),
            DecoderKind::Ruff => ruff::decode(payload, root),
            DecoderKind::Dart => dart::decode(payload, root),
        };
        decoded.map_err(|source| Error::Decode {
            ecosystem: ecosystem.to_string(),
            payload: payload.to_string(),
            source,
        })
    }
}
