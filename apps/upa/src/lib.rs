//! upa core library.
//!
//! Turns linter JSON and compiler text from several language toolchains
//! into one report, grouped by directory then file, with each diagnostic
//! shown under the source line it points at.
//!
//! High-level modules:
//! - `paths`: Reconciles tool-reported paths to project-relative keys.
//! - `decoders`: Per-ecosystem JSON decoders (golangci-lint, ruff, dart).
//! - `extract`: Tolerant `file:line[:col]: message` compiler text parsing.
//! - `cache`: Per-run source line cache.
//! - `report`: Grouping and block rendering.
//! - `ecosystem`: Registry of language keys, tools and decoders.
//! - `runner`: External command execution.
//! - `analyzer`: Orchestrates one analysis run.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Text/JSON rendering and report writing.
//! - `cli`, `utils`: CLI parsing and terminal helpers for the binary.
pub mod analyzer;
pub mod cache;
pub mod cli;
pub mod config;
pub mod decoders;
pub mod ecosystem;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod paths;
pub mod report;
pub mod runner;
pub mod utils;

pub use analyzer::Analyzer;
pub use error::{Error, Result};
pub use models::{Issue, Report};
