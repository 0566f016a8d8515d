//! Report assembly.
//!
//! Issues are grouped by directory, then by file, in the order each
//! directory and file was first seen. Keeping emission order instead of
//! sorting lets a reader line the report up with the tool's own output.
//!
//! Layout of a non-empty block:
//! ```text
//! --- Compiler Errors ---
//! # internal/db/:
//!
//! internal/db/conn.go:
//!
//! return nil
//! 12:9: missing return
//!
//! ```

use crate::cache::{SourceLines, SourceReader, LINE_OUT_OF_RANGE, SOURCE_UNAVAILABLE};
use crate::models::Issue;
use crate::paths;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

pub const LINTER_HEADER: &str = "--- Linter Errors ---";
pub const COMPILER_HEADER: &str = "--- Compiler Errors ---";
pub const ROOT_LABEL: &str = "(project root)";

/// Compiler block for ecosystems without a build step.
pub fn not_applicable_block() -> String {
    format!("{}\nNot applicable for this language.\n", COMPILER_HEADER)
}

#[derive(Debug, Default)]
pub struct FileGroup<'a> {
    pub file: String,
    pub issues: Vec<&'a Issue>,
}

#[derive(Debug, Default)]
pub struct DirGroup<'a> {
    /// Slash-separated directory key; `""` is the project root.
    pub dir: String,
    pub files: Vec<FileGroup<'a>>,
    file_index: HashMap<String, usize>,
}

/// Issues bucketed by directory then file, both in first-seen order.
#[derive(Debug, Default)]
pub struct GroupedIssues<'a> {
    pub dirs: Vec<DirGroup<'a>>,
    dir_index: HashMap<String, usize>,
}

impl<'a> GroupedIssues<'a> {
    pub fn new(issues: &'a [Issue]) -> Self {
        let mut grouped = GroupedIssues::default();
        for issue in issues {
            grouped.push(issue);
        }
        grouped
    }

    fn push(&mut self, issue: &'a Issue) {
        let dir = paths::dir_key(&issue.file);
        let d = match self.dir_index.get(&dir) {
            Some(&d) => d,
            None => {
                self.dir_index.insert(dir.clone(), self.dirs.len());
                self.dirs.push(DirGroup {
                    dir,
                    ..Default::default()
                });
                self.dirs.len() - 1
            }
        };
        let group = &mut self.dirs[d];
        let f = match group.file_index.get(&issue.file) {
            Some(&f) => f,
            None => {
                group.file_index.insert(issue.file.clone(), group.files.len());
                group.files.push(FileGroup {
                    file: issue.file.clone(),
                    issues: Vec::new(),
                });
                group.files.len() - 1
            }
        };
        group.files[f].issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Distinct file keys in first-seen order.
    pub fn files(&self) -> Vec<&str> {
        self.dirs
            .iter()
            .flat_map(|d| d.files.iter().map(|f| f.file.as_str()))
            .collect()
    }
}

/// Render the linter block.
pub fn assemble_linter_block<R: SourceReader>(
    root: &Path,
    issues: &[Issue],
    sources: &SourceLines<R>,
) -> String {
    let mut out = format!("{}\n", LINTER_HEADER);
    if issues.is_empty() {
        out.push_str("No linter errors found.\n\n");
        return out;
    }
    write_groups(&mut out, root, &GroupedIssues::new(issues), sources);
    out
}

/// Render the compiler block. When nothing structured was found but the
/// tool printed something, the raw lines are appended verbatim.
pub fn assemble_compiler_block<R: SourceReader>(
    root: &Path,
    issues: &[Issue],
    found_any: bool,
    raw_lines: &[String],
    sources: &SourceLines<R>,
) -> String {
    let mut out = format!("{}\n", COMPILER_HEADER);
    if !found_any || issues.is_empty() {
        out.push_str("No compiler errors found.\n");
        if !raw_lines.is_empty() {
            let _ = writeln!(
                out,
                "({} lines of raw compiler output were received, but none matched 'file:line[:column]: message'. Raw output follows.)",
                raw_lines.len()
            );
            for line in raw_lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        return out;
    }
    write_groups(&mut out, root, &GroupedIssues::new(issues), sources);
    out
}

fn write_groups<R: SourceReader>(
    out: &mut String,
    root: &Path,
    grouped: &GroupedIssues<'_>,
    sources: &SourceLines<R>,
) {
    for dir in &grouped.dirs {
        let label = if dir.dir.is_empty() {
            ROOT_LABEL
        } else {
            dir.dir.trim_end_matches('/')
        };
        let _ = writeln!(out, "# {}/:\n", label);
        for file in &dir.files {
            let _ = writeln!(out, "{}:\n", file.file);
            let source = paths::source_path(root, &file.file);
            for issue in &file.issues {
                let text = sources.line(&source, issue.line);
                if text == SOURCE_UNAVAILABLE || text == LINE_OUT_OF_RANGE {
                    tracing::warn!(
                        file = %source.display(),
                        line = issue.line,
                        "{}",
                        text
                    );
                }
                let _ = writeln!(out, "{}", text.trim());
                let _ = writeln!(out, "{}:{}: {}\n", issue.line, issue.column, issue.message);
            }
        }
    }
}
