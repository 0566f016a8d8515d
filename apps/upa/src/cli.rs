//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "upa",
    version,
    about = "Unified project analysis report",
    long_about = "upa runs a project's linter (and build, where the language has one) and writes a single report grouping every finding by directory and file, each shown under its source line.\n\nConfiguration precedence: CLI > upa.toml > defaults.",
    after_help = "Examples:\n  upa analyze --language go --dir ./api\n  upa analyze --language python --fix --out report.txt\n  upa analyze --language flutter --prompt --stdout\n  upa languages",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Log debug details to stderr (overridden by UPA_LOG)
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current upa version.")]
    Version,
    /// Analyze a project directory
    #[command(
        about = "Analyze a project",
        long_about = "Run the language's build step and linter in the project directory and write a report with linter and compiler blocks.",
        after_help = "Examples:\n  upa analyze --language go\n  upa analyze --language dart --dir app --output json"
    )]
    Analyze {
        #[arg(long, short, help = "Language key: go, python, dart, flutter (or one defined in upa.toml)")]
        language: Option<String>,
        #[arg(long, short, help = "Project directory to analyze (default: current dir)")]
        dir: Option<String>,
        #[arg(long, short, help = "Output report file (default: project_analysis_report.txt)")]
        out: Option<String>,
        #[arg(long, help = "Output mode: text|json (default: text)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Run formatters and auto-fix before analyzing")]
        fix: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Prefix the report with a prompt for a coding agent")]
        prompt: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Print the report instead of writing --out")]
        stdout: bool,
    },
    /// List supported languages
    #[command(
        about = "List languages",
        long_about = "List language keys with the analyzer and build commands they run."
    )]
    Languages {
        #[arg(long, short, help = "Project directory whose upa.toml to include")]
        dir: Option<String>,
    },
}
