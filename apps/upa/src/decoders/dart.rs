//! `dart analyze --format=json` output (also used for Flutter projects).
//!
//! Locations are absolute and, when the project directory is passed both
//! as working directory and argument, occasionally carry the root twice.

use crate::models::Issue;
use crate::paths;
use serde::Deserialize;

#[derive(Deserialize)]
struct Output {
    #[serde(default)]
    diagnostics: Vec<Diagnostic>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Diagnostic {
    #[serde(default)]
    code: String,
    problem_message: String,
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    file: String,
    range: Range,
}

#[derive(Deserialize)]
struct Range {
    start: Point,
}

#[derive(Deserialize)]
struct Point {
    line: u32,
    column: u32,
}

pub(super) fn decode(payload: &str, root: &str) -> serde_json::Result<Vec<Issue>> {
    let out: Output = serde_json::from_str(payload)?;
    Ok(out
        .diagnostics
        .into_iter()
        .map(|d| Issue {
            file: paths::reconcile(root, &d.location.file),
            line: d.location.range.start.line,
            column: d.location.range.start.column,
            message: d.problem_message,
            originator: d.code,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_diagnostics() {
        let payload = r#"{"version": 1, "diagnostics": [
          {"code": "unused_import", "severity": "WARNING", "type": "STATIC_WARNING",
           "location": {"file": "/home/u/app/home/u/app/lib/main.dart",
             "range": {"start": {"offset": 7, "line": 1, "column": 8},
                       "end": {"offset": 30, "line": 1, "column": 31}}},
           "problemMessage": "Unused import: 'dart:async'.",
           "correctionMessage": "Try removing the import directive.",
           "documentation": "https://dart.dev/diagnostics/unused_import"},
          {"code": "undefined_identifier", "severity": "ERROR", "type": "COMPILE_TIME_ERROR",
           "location": {"file": "/home/u/app/lib/src/widgets/card.dart",
             "range": {"start": {"offset": 120, "line": 9, "column": 12},
                       "end": {"offset": 125, "line": 9, "column": 17}}},
           "problemMessage": "Undefined name 'ctx'."}
        ]}"#;
        let issues = decode(payload, "/home/u/app").unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0],
            Issue {
                file: "lib/main.dart".into(),
                line: 1,
                column: 8,
                message: "Unused import: 'dart:async'.".into(),
                originator: "unused_import".into(),
            }
        );
        assert_eq!(issues[1].file, "lib/src/widgets/card.dart");
        assert_eq!((issues[1].line, issues[1].column), (9, 12));
        assert_eq!(issues[1].originator, "undefined_identifier");
    }

    #[test]
    fn test_no_diagnostics() {
        assert!(decode(r#"{"version": 1, "diagnostics": []}"#, "/home/u/app").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_text_output() {
        assert!(decode("Analyzing app...\nNo issues found!", "/home/u/app").is_err());
    }
}
