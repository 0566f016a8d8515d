//! ruff JSON output: a top-level array of diagnostics with absolute
//! filenames. `code` is `null` for syntax errors.

use crate::models::Issue;
use crate::paths;
use serde::Deserialize;

#[derive(Deserialize)]
struct Diagnostic {
    filename: String,
    message: String,
    #[serde(default)]
    code: Option<String>,
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    row: u32,
    column: u32,
}

pub(super) fn decode(payload: &str, root: &str) -> serde_json::Result<Vec<Issue>> {
    let diags: Vec<Diagnostic> = serde_json::from_str(payload)?;
    Ok(diags
        .into_iter()
        .map(|d| Issue {
            file: paths::reconcile(root, &d.filename),
            line: d.location.row,
            column: d.location.column,
            message: d.message,
            originator: d.code.unwrap_or_else(|| "ruff".to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_diagnostics() {
        let payload = r#"[
          {"cell": null, "code": "F401", "end_location": {"column": 10, "row": 1},
           "filename": "/srv/app/pkg/util.py", "fix": null,
           "location": {"column": 8, "row": 1}, "message": "`os` imported but unused",
           "noqa_row": 1, "url": "https://docs.astral.sh/ruff/rules/unused-import"},
          {"code": null, "filename": "/srv/app/main.py",
           "location": {"column": 5, "row": 12}, "message": "SyntaxError: Expected ':'"}
        ]"#;
        let issues = decode(payload, "/srv/app").unwrap();
        assert_eq!(
            issues,
            vec![
                Issue {
                    file: "pkg/util.py".into(),
                    line: 1,
                    column: 8,
                    message: "`os` imported but unused".into(),
                    originator: "F401".into(),
                },
                Issue {
                    file: "main.py".into(),
                    line: 12,
                    column: 5,
                    message: "SyntaxError: Expected ':'".into(),
                    originator: "ruff".into(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_array() {
        assert!(decode("[]", "/srv/app").unwrap().is_empty());
    }

    #[test]
    fn test_missing_location_is_error() {
        assert!(decode(r#"[{"filename": "a.py", "message": "m", "code": "E1"}]"#, "/srv/app").is_err());
    }
}
