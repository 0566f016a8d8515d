//! Shared data models for decoded diagnostics and assembled reports.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single diagnostic in the unified shape.
///
/// `file` is always a reconciled path (see `paths::reconcile`). `line` is
/// 1-based and `column` 0 when the tool did not report one.
pub struct Issue {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub originator: String,
}

#[derive(Debug, Clone, Serialize)]
/// Both report blocks plus the issues they were rendered from.
pub struct Report {
    pub language: String,
    pub linter: String,
    pub compiler: String,
    pub linter_issues: Vec<Issue>,
    pub compiler_issues: Vec<Issue>,
}
