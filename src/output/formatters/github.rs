//! GitHub Actions annotation format

use crate::output::OutputFormatter;
use crate::scanner::ScanResult;

/// GitHub Actions formatter
/// Outputs in the format: ::warning file=<file>,line=<line>,title=<title>::<message>
#[derive(Default)]
pub struct GitHubFormatter;

impl GitHubFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// Annotation values must not contain raw newlines or `%`
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Properties additionally escape `:` and `,`
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

impl OutputFormatter for GitHubFormatter {
    fn format_violations(&self, result: &ScanResult, file_path: &str) -> String {
        result
            .iter()
            .map(|violation| {
                format!(
                    "::warning file={},line={},title=Code block missing language::{}",
                    escape_property(file_path),
                    violation.line_number,
                    escape_data(&violation.describe())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
