//! JSON output formatter

use crate::output::OutputFormatter;
use crate::scanner::ScanResult;
use serde_json::{Value, json};

/// JSON formatter for machine-readable output.
///
/// Per-file output is empty: all files are written as one array by
/// [`format_all_as_json`] once the run is complete.
pub struct JsonFormatter;

fn violations_to_json(result: &ScanResult, file_path: &str) -> Vec<Value> {
    result
        .iter()
        .map(|violation| {
            json!({
                "file": file_path,
                "line": violation.line_number,
                "preview": violation.preview,
                "message": violation.describe(),
            })
        })
        .collect()
}

impl OutputFormatter for JsonFormatter {
    fn format_violations(&self, _result: &ScanResult, _file_path: &str) -> String {
        String::new()
    }
}

/// Format the violations of every scanned file as a single JSON array
pub fn format_all_as_json(results: &[(String, ScanResult)]) -> String {
    let all: Vec<Value> = results
        .iter()
        .flat_map(|(path, result)| violations_to_json(result, path))
        .collect();
    serde_json::to_string_pretty(&all).unwrap_or_default()
}
