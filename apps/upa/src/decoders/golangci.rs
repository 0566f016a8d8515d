//! golangci-lint JSON output.
//!
//! ```json
//! {"Issues": [{"FromLinter": "errcheck", "Text": "...",
//!              "Pos": {"Filename": "pkg/x.go", "Line": 3, "Column": 7}}]}
//! ```
//! `Issues` is `null` when nothing was found.

use crate::models::Issue;
use crate::paths;
use serde::Deserialize;

#[derive(Deserialize)]
struct Output {
    #[serde(rename = "Issues", default)]
    issues: Option<Vec<LintIssue>>,
}

#[derive(Deserialize)]
struct LintIssue {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "FromLinter", default)]
    from_linter: String,
    #[serde(rename = "Pos")]
    pos: Position,
}

#[derive(Deserialize)]
struct Position {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Line", default)]
    line: u32,
    #[serde(rename = "Column", default)]
    column: u32,
}

pub(super) fn decode(payload: &str, root: &str) -> serde_json::Result<Vec<Issue>> {
    let out: Output = serde_json::from_str(payload)?;
    Ok(out
        .issues
        .unwrap_or_default()
        .into_iter()
        .map(|is| Issue {
            file: paths::reconcile(root, &is.pos.filename),
            line: is.pos.line,
            column: is.pos.column,
            message: is.text,
            originator: is.from_linter,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_issues() {
        let payload = r#"{
          "Issues": [
            {"FromLinter": "errcheck", "Text": "Error return value of `f.Close` is not checked",
             "Severity": "", "SourceLines": ["\tf.Close()"],
             "Pos": {"Filename": "internal/store/file.go", "Offset": 310, "Line": 18, "Column": 9}},
            {"FromLinter": "unused", "Text": "func `helper` is unused",
             "Pos": {"Filename": "main.go", "Line": 40, "Column": 6}}
          ],
          "Report": {"Linters": []}
        }"#;
        let issues = decode(payload, "/work/api").unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0],
            Issue {
                file: "internal/store/file.go".into(),
                line: 18,
                column: 9,
                message: "Error return value of `f.Close` is not checked".into(),
                originator: "errcheck".into(),
            }
        );
        assert_eq!(issues[1].file, "main.go");
        assert_eq!(issues[1].originator, "unused");
    }

    #[test]
    fn test_null_issues() {
        assert!(decode(r#"{"Issues": null, "Report": {}}"#, "/work/api").unwrap().is_empty());
        assert!(decode("{}", "/work/api").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(decode("[]", "/work/api").is_err());
        assert!(decode("level=error msg=\"no go files\"", "/work/api").is_err());
    }
}
