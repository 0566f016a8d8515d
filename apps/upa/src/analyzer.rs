//! Analysis run: fix (optional), build, lint, then assemble both blocks.
//!
//! Each step fully consumes the previous one; nothing runs in parallel.
//! A fresh `SourceLines` is built per run so no source text outlives it.

use crate::cache::SourceLines;
use crate::ecosystem::{Ecosystem, Registry};
use crate::error::Result;
use crate::extract;
use crate::models::{Issue, Report};
use crate::report;
use crate::runner::{CommandRunner, RawToolOutput};
use std::path::{Path, PathBuf};

pub struct Analyzer<R> {
    registry: Registry,
    runner: R,
}

impl<R: CommandRunner> Analyzer<R> {
    pub fn new(registry: Registry, runner: R) -> Self {
        Self { registry, runner }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Analyze `dir` with the tools registered for `language`.
    ///
    /// Fails before running anything when the language is unknown, and
    /// aborts when the analyzer's JSON cannot be decoded.
    pub fn analyze(&self, language: &str, dir: &Path, fix: bool) -> Result<Report> {
        let eco = self.registry.get(language).inspect_err(|err| {
            tracing::error!("{}", err);
        })?;
        let root = absolute_root(dir);
        let root_str = root.to_string_lossy().to_string();

        if fix {
            self.run_fixes(eco, &root, &root_str);
        }

        let build = match &eco.build {
            Some(argv) => Some(self.runner.run(&root, argv)?),
            None => None,
        };

        let lint = self.runner.run(&root, &eco.analyze_command(&root_str))?;
        let linter_issues = decode_lint(eco, &lint, &root_str)?;

        let sources = SourceLines::new();
        let linter = report::assemble_linter_block(&root, &linter_issues, &sources);
        let (compiler, compiler_issues) = match &build {
            Some(out) => {
                let extracted = extract::extract(&root_str, &out.combined_lines);
                let block = report::assemble_compiler_block(
                    &root,
                    &extracted.issues,
                    extracted.found_any,
                    &out.combined_lines,
                    &sources,
                );
                (block, extracted.issues)
            }
            None => (report::not_applicable_block(), Vec::new()),
        };
        tracing::debug!(
            language = %eco.key,
            linter = linter_issues.len(),
            compiler = compiler_issues.len(),
            files_read = sources.len(),
            "report assembled"
        );

        Ok(Report {
            language: eco.key.clone(),
            linter,
            compiler,
            linter_issues,
            compiler_issues,
        })
    }

    /// Best effort: a fixer that is not installed is skipped.
    fn run_fixes(&self, eco: &Ecosystem, root: &Path, root_str: &str) {
        let commands = eco
            .pre_fix
            .iter()
            .cloned()
            .chain(eco.fix_command(root_str));
        for argv in commands {
            match self.runner.run(root, &argv) {
                Ok(out) if !out.success() => {
                    tracing::warn!(command = %argv.join(" "), status = ?out.status, "fix step failed")
                }
                Ok(_) => tracing::info!(command = %argv.join(" "), "fix step applied"),
                Err(err) => tracing::warn!("skipping fix step: {}", err),
            }
        }
    }
}

fn decode_lint(eco: &Ecosystem, lint: &RawToolOutput, root: &str) -> Result<Vec<Issue>> {
    if lint.stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    eco.decoder
        .decode(&eco.key, &lint.stdout, root)
        .inspect_err(|err| tracing::error!("{}", err))
}

fn absolute_root(dir: &Path) -> PathBuf {
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}
