//! Compiler text extraction.
//!
//! Build tools print diagnostics as free text, typically
//! `path:line[:column]: message`, interleaved with package headers
//! (`# example.com/pkg`) and continuation notes. Lines that do not have
//! the diagnostic shape are skipped rather than guessed at.

use crate::models::Issue;
use crate::paths;
use regex::Regex;
use std::sync::LazyLock;

/// Originator recorded on every extracted issue.
pub const COMPILER: &str = "compiler";

// The path may not start with `#`, `:` or whitespace, which rules out
// package headers and indented continuation lines.
static DIAGNOSTIC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:#\s].*?):([0-9]+):(?:([0-9]+):)?\s*(.*)")
        .expect("DIAGNOSTIC_LINE regex should compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// One structured diagnostic line, path not yet reconciled.
pub struct CompilerLine {
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub issues: Vec<Issue>,
    /// True when at least one line had the diagnostic shape.
    pub found_any: bool,
}

/// Match a single line against the diagnostic shape.
pub fn parse_line(line: &str) -> Option<CompilerLine> {
    let caps = DIAGNOSTIC_LINE.captures(line)?;
    let number = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().trim().parse::<u32>().ok())
            .unwrap_or(0)
    };
    Some(CompilerLine {
        path: caps[1].trim().to_string(),
        line: number(2),
        column: number(3),
        message: caps[4].trim().to_string(),
    })
}

/// Extract issues from raw compiler output lines, reconciling each path
/// against `root`.
pub fn extract(root: &str, lines: &[String]) -> Extraction {
    let mut out = Extraction::default();
    for raw in lines {
        if let Some(hit) = parse_line(raw) {
            out.found_any = true;
            out.issues.push(Issue {
                file: paths::reconcile(root, &hit.path),
                line: hit.line,
                column: hit.column,
                message: hit.message,
                originator: COMPILER.to_string(),
            });
        } else if raw.starts_with("# ") {
            tracing::trace!(header = %raw, "compiler section header");
        } else if !raw.trim().is_empty() {
            tracing::trace!(line = %raw, "skipping unstructured compiler output");
        }
    }
    out
}
