//! Configuration discovery and effective settings resolution.
//!
//! upa reads `upa.toml|yaml|yml` from the project directory and merges it
//! with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `dir`: `.`
//! - `out`: `project_analysis_report.txt`
//! - `output`: `text`
//! - `fix`, `prompt`: false
//! - `languages`: built-in registry, adjusted by `[languages.<key>]`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::ecosystem::{EcosystemOverride, Registry};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUT: &str = "project_analysis_report.txt";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `upa.toml|yaml`.
pub struct UpaConfig {
    pub language: Option<String>,
    pub out: Option<String>,
    pub output: Option<String>,
    pub fix: Option<bool>,
    pub prompt: Option<bool>,
    #[serde(default)]
    pub languages: HashMap<String, EcosystemOverride>, // [languages.<key>]
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub project_dir: PathBuf,
    pub language: Option<String>,
    pub out: PathBuf,
    pub output: String,
    pub fix: bool,
    pub prompt: bool,
    pub registry: Registry,
    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
}

/// Locate `upa.toml`, then `upa.yaml|yml`, directly in `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    ["upa.toml", "upa.yaml", "upa.yml"]
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Load `UpaConfig` from `path`, choosing the parser by extension.
pub fn load_config(path: &Path) -> Result<UpaConfig> {
    let s = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str::<UpaConfig>(&s).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str::<UpaConfig>(&s).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// A relative `out` is kept relative to the caller's working directory,
/// matching how it was typed.
pub fn resolve_effective(
    cli_dir: Option<&str>,
    cli_language: Option<&str>,
    cli_out: Option<&str>,
    cli_output: Option<&str>,
    cli_fix: Option<bool>,
    cli_prompt: Option<bool>,
) -> Result<Effective> {
    let project_dir = PathBuf::from(cli_dir.unwrap_or("."));
    let config_path = find_config(&project_dir);
    let cfg = match &config_path {
        Some(p) => load_config(p)?,
        None => UpaConfig::default(),
    };

    let language = cli_language.map(|s| s.to_string()).or(cfg.language);
    let out = cli_out
        .map(|s| s.to_string())
        .or(cfg.out)
        .unwrap_or_else(|| DEFAULT_OUT.to_string());
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "text".to_string());
    let fix = cli_fix.or(cfg.fix).unwrap_or(false);
    let prompt = cli_prompt.or(cfg.prompt).unwrap_or(false);

    let mut registry = Registry::builtin();
    registry.apply_overrides(&cfg.languages);

    Ok(Effective {
        project_dir,
        language,
        out: PathBuf::from(out),
        output,
        fix,
        prompt,
        registry,
        config_path,
    })
}
