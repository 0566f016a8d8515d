//! Ecosystem registry: which tools to run for a language key and how to
//! decode what they print.
//!
//! The registry is an explicit value handed to the analyzer. `builtin()`
//! covers Go, Python, Dart and Flutter; `[languages.<key>]` tables in the
//! config file can adjust those entries or add new keys that reuse one of
//! the known decoders.

use crate::decoders::DecoderKind;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Placeholder substituted with the project directory in argument templates.
pub const DIR_PLACEHOLDER: &str = "{dir}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecosystem {
    pub key: String,
    /// Analyzer executable.
    pub tool: String,
    /// Analyzer arguments; may contain `{dir}`.
    pub analyze_args: Vec<String>,
    /// Auto-fix arguments for `tool`, when it has a fix mode.
    pub fix_args: Option<Vec<String>>,
    /// Commands run before the fix step (formatters, import fixers).
    pub pre_fix: Vec<Vec<String>>,
    /// Build command whose text output feeds the compiler block.
    pub build: Option<Vec<String>>,
    pub decoder: DecoderKind,
}

impl Ecosystem {
    pub fn analyze_command(&self, dir: &str) -> Vec<String> {
        let mut argv = vec![self.tool.clone()];
        argv.extend(expand_args(&self.analyze_args, dir));
        argv
    }

    pub fn fix_command(&self, dir: &str) -> Option<Vec<String>> {
        let args = self.fix_args.as_ref()?;
        let mut argv = vec![self.tool.clone()];
        argv.extend(expand_args(args, dir));
        Some(argv)
    }
}

/// Substitute every `{dir}` in `template` with `dir`.
pub fn expand_args(template: &[String], dir: &str) -> Vec<String> {
    template
        .iter()
        .map(|a| a.replace(DIR_PLACEHOLDER, dir))
        .collect()
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Config-file override for one ecosystem; unset fields keep the built-in value.
pub struct EcosystemOverride {
    pub tool: Option<String>,
    pub args: Option<Vec<String>>,
    pub fix_args: Option<Vec<String>>,
    pub pre_fix: Option<Vec<Vec<String>>>,
    pub build: Option<Vec<String>>,
    pub decoder: Option<DecoderKind>,
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Ecosystem>,
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

impl Registry {
    pub fn new(entries: Vec<Ecosystem>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        let dart = |key: &str| Ecosystem {
            key: key.to_string(),
            tool: "dart".into(),
            analyze_args: strings(&["analyze", "--format=json", DIR_PLACEHOLDER]),
            fix_args: Some(strings(&["fix", "--apply"])),
            pre_fix: Vec::new(),
            build: None,
            decoder: DecoderKind::Dart,
        };
        Self::new(vec![
            Ecosystem {
                key: "go".into(),
                tool: "golangci-lint".into(),
                analyze_args: strings(&[
                    "run",
                    DIR_PLACEHOLDER,
                    "--issues-exit-code=0",
                    "--output.json.path",
                    "stdout",
                ]),
                fix_args: None,
                pre_fix: vec![
                    strings(&["go", "fmt", "./..."]),
                    strings(&["goimports", "-w", "."]),
                ],
                build: Some(strings(&["go", "build", "./..."])),
                decoder: DecoderKind::Golangci,
            },
            Ecosystem {
                key: "python".into(),
                tool: "ruff".into(),
                analyze_args: strings(&["check", DIR_PLACEHOLDER, "--output-format=json", "--exit-zero"]),
                fix_args: Some(strings(&["check", DIR_PLACEHOLDER, "--exit-zero", "--fix"])),
                pre_fix: Vec::new(),
                build: None,
                decoder: DecoderKind::Ruff,
            },
            dart("dart"),
            dart("flutter"),
        ])
    }

    pub fn get(&self, key: &str) -> Result<&Ecosystem> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| Error::UnsupportedEcosystem {
                key: key.to_string(),
                supported: self.keys(),
            })
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ecosystem> {
        self.entries.iter()
    }

    /// Merge config overrides. Keys not yet registered become new entries,
    /// which need at least `tool`, `args` and `decoder`; incomplete new
    /// entries are skipped with a warning.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, EcosystemOverride>) {
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();
        for key in keys {
            let ov = &overrides[key];
            if let Some(entry) = self.entries.iter_mut().find(|e| &e.key == key) {
                if let Some(tool) = &ov.tool {
                    entry.tool = tool.clone();
                }
                if let Some(args) = &ov.args {
                    entry.analyze_args = args.clone();
                }
                if let Some(fix) = &ov.fix_args {
                    entry.fix_args = Some(fix.clone());
                }
                if let Some(pre) = &ov.pre_fix {
                    entry.pre_fix = pre.clone();
                }
                if let Some(build) = &ov.build {
                    entry.build = Some(build.clone()).filter(|b| !b.is_empty());
                }
                if let Some(decoder) = ov.decoder {
                    entry.decoder = decoder;
                }
                continue;
            }
            match (&ov.tool, &ov.args, ov.decoder) {
                (Some(tool), Some(args), Some(decoder)) => self.entries.push(Ecosystem {
                    key: key.clone(),
                    tool: tool.clone(),
                    analyze_args: args.clone(),
                    fix_args: ov.fix_args.clone(),
                    pre_fix: ov.pre_fix.clone().unwrap_or_default(),
                    build: ov.build.clone().filter(|b| !b.is_empty()),
                    decoder,
                }),
                _ => tracing::warn!(
                    language = %key,
                    "ignoring new language without tool, args and decoder"
                ),
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys() {
        assert_eq!(Registry::builtin().keys(), vec!["go", "python", "dart", "flutter"]);
    }

    #[test]
    fn test_unknown_key() {
        let reg = Registry::builtin();
        match reg.get("cobol").unwrap_err() {
            Error::UnsupportedEcosystem { key, supported } => {
                assert_eq!(key, "cobol");
                assert_eq!(supported.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dir_placeholder_is_expanded() {
        let reg = Registry::builtin();
        assert_eq!(
            reg.get("go").unwrap().analyze_command("/work/api"),
            vec!["golangci-lint", "run", "/work/api", "--issues-exit-code=0", "--output.json.path", "stdout"]
        );
        assert_eq!(
            reg.get("flutter").unwrap().analyze_command("/work/app"),
            vec!["dart", "analyze", "--format=json", "/work/app"]
        );
        assert_eq!(
            reg.get("python").unwrap().fix_command("/srv/py"),
            Some(strings(&["ruff", "check", "/srv/py", "--exit-zero", "--fix"]))
        );
        assert_eq!(reg.get("go").unwrap().fix_command("/work/api"), None);
    }

    #[test]
    fn test_overrides_adjust_and_add() {
        let mut reg = Registry::builtin();
        let mut ov = HashMap::new();
        ov.insert(
            "go".to_string(),
            EcosystemOverride {
                build: Some(strings(&["go", "vet", "./..."])),
                ..Default::default()
            },
        );
        ov.insert(
            "py-legacy".to_string(),
            EcosystemOverride {
                tool: Some("ruff".into()),
                args: Some(strings(&["check", "{dir}", "--format=json", "--exit-zero"])),
                decoder: Some(DecoderKind::Ruff),
                ..Default::default()
            },
        );
        ov.insert("half".to_string(), EcosystemOverride { tool: Some("x".into()), ..Default::default() });
        reg.apply_overrides(&ov);

        let go = reg.get("go").unwrap();
        assert_eq!(go.build, Some(strings(&["go", "vet", "./..."])));
        assert_eq!(go.tool, "golangci-lint");
        assert_eq!(reg.get("py-legacy").unwrap().decoder, DecoderKind::Ruff);
        assert!(reg.get("half").is_err());
    }
}
