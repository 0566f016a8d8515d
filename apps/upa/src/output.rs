//! Output rendering for analysis reports.
//!
//! Supports `text` (default) and `json`. Text is the two report blocks,
//! optionally preceded by a prompt for a coding agent. The JSON form keeps
//! the blocks and adds the structured issues plus a summary.

use crate::error::{Error, Result};
use crate::models::Report;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fs;
use std::path::Path;

/// Preamble for handing a report to a coding agent.
pub const AGENT_PROMPT: &str = "The following is a list of linting/compiler errors from my project.
Please help me fix them. For each file, address the listed issues.
Apply changes directly to the files.";

/// Compose the text report: linter block, blank line, compiler block.
///
/// With `prompt`, the agent preamble and an `/add` line naming every file
/// with an issue come first.
pub fn compose_text(report: &Report, prompt: bool) -> String {
    let mut out = String::new();
    if prompt {
        out.push_str(AGENT_PROMPT);
        out.push('\n');
        let files = issue_files(report);
        if !files.is_empty() {
            out.push_str("/add ");
            out.push_str(&files.join(" "));
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&report.linter);
    out.push('\n');
    out.push_str(&report.compiler);
    out
}

/// Compose the JSON report (pure) for machine consumers and tests.
pub fn compose_json(report: &Report) -> JsonVal {
    json!({
        "language": report.language,
        "linter": {
            "issues": report.linter_issues,
            "text": report.linter,
        },
        "compiler": {
            "issues": report.compiler_issues,
            "text": report.compiler,
        },
        "summary": {
            "linter": report.linter_issues.len(),
            "compiler": report.compiler_issues.len(),
            "files": issue_files(report).len(),
        },
    })
}

/// Render in the requested mode (`json` or anything else for text).
pub fn render(report: &Report, output: &str, prompt: bool) -> String {
    match output {
        "json" => {
            let mut s = serde_json::to_string_pretty(&compose_json(report))
                .unwrap_or_else(|_| "{}".to_string());
            s.push('\n');
            s
        }
        _ => compose_text(report, prompt),
    }
}

pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Distinct files with issues, linter first, in first-seen order.
fn issue_files(report: &Report) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    report
        .linter_issues
        .iter()
        .chain(report.compiler_issues.iter())
        .map(|i| i.file.as_str())
        .filter(|f| seen.insert(*f))
        .collect()
}
