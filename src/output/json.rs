use serde_json::{Value, json};

use super::OutputFormatter;
use crate::rule::LintWarning;

/// Machine readable output: an array of report objects
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

fn warning_to_json(warning: &LintWarning, file_path: &str) -> Value {
    json!({
        "file": file_path,
        "rule": warning.rule_name,
        "message": warning.message,
        "severity": warning.severity,
        "start": warning.range.start,
        "end": warning.range.end,
        "line": warning.line,
        "column": warning.column,
        "end_line": warning.end_line,
        "end_column": warning.end_column,
        "fixes": warning.fixes.iter().map(|fix| json!({
            "replacement": fix.replacement,
            "description": fix.description,
        })).collect::<Vec<_>>(),
    })
}

impl OutputFormatter for JsonFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        let values: Vec<Value> = warnings.iter().map(|w| warning_to_json(w, file_path)).collect();
        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_all(&self, files: &[(String, Vec<LintWarning>)]) -> String {
        let values: Vec<Value> = files
            .iter()
            .flat_map(|(path, warnings)| warnings.iter().map(move |w| warning_to_json(w, path)))
            .collect();
        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }
}
