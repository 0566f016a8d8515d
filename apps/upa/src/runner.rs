//! Running external linters and compilers.
//!
//! A non-zero exit is normal for these tools (it usually means "issues
//! found"), so it is reported in the output rather than as an error. Only a
//! failure to start the program is an error.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Captured output of one invocation.
pub struct RawToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
    /// stderr lines then stdout lines, each without trailing blank lines.
    pub combined_lines: Vec<String>,
}

impl RawToolOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, status: Option<i32>) -> Self {
        let stdout = stdout.into();
        let stderr = stderr.into();
        let mut combined_lines = section_lines(&stderr);
        combined_lines.extend(section_lines(&stdout));
        Self {
            stdout,
            stderr,
            status,
            combined_lines,
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

fn section_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Runs a program in a working directory and captures its output.
pub trait CommandRunner {
    fn run(&self, dir: &Path, argv: &[String]) -> Result<RawToolOutput>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, dir: &Path, argv: &[String]) -> Result<RawToolOutput> {
        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
        tracing::debug!(dir = %dir.display(), command = %argv.join(" "), "running");
        let out = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| Error::ToolUnavailable {
                program: program.clone(),
                source,
            })?;
        let result = RawToolOutput::new(
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr),
            out.status.code(),
        );
        if !result.success() {
            tracing::info!(
                command = %argv.join(" "),
                status = ?result.status,
                "command finished with non-zero status; stderr may contain details"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_precedes_stdout_and_blank_tails_trimmed() {
        let out = RawToolOutput::new("b1\nb2\n\n", "a1\n  \n", Some(1));
        assert_eq!(out.combined_lines, vec!["a1", "b1", "b2"]);
        assert!(!out.success());
    }

    #[test]
    fn test_blank_output_has_no_lines() {
        let out = RawToolOutput::new("\n\n", "", Some(0));
        assert!(out.combined_lines.is_empty());
        assert!(out.success());
    }

    #[test]
    fn test_empty_argv() {
        let err = ProcessRunner.run(Path::new("."), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyCommand));
    }

    #[test]
    fn test_missing_program() {
        let argv = vec!["upa-definitely-not-installed".to_string()];
        let err = ProcessRunner.run(Path::new("."), &argv).unwrap_err();
        match err {
            Error::ToolUnavailable { program, .. } => assert_eq!(program, "upa-definitely-not-installed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let argv: Vec<String> = ["sh", "-c", "pwd; echo 'x.go:1:1: bad' >&2; exit 3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let out = ProcessRunner.run(dir.path(), &argv).unwrap();
        assert_eq!(out.status, Some(3));
        assert_eq!(out.combined_lines[0], "x.go:1:1: bad");
        assert_eq!(out.combined_lines.len(), 2);
    }
}
