//! Default text output formatter with colors

use crate::output::OutputFormatter;
use crate::scanner::ScanResult;
use colored::*;

/// Human-readable formatter: `file:line: message`
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_violations(&self, result: &ScanResult, file_path: &str) -> String {
        result
            .iter()
            .map(|violation| {
                if self.use_colors {
                    format!(
                        "{}:{}: {} {}",
                        file_path.blue().underline(),
                        violation.line_number.to_string().cyan(),
                        "Missing language for code block.".yellow(),
                        format!("Code starts with: \"{}\"", violation.preview).dimmed()
                    )
                } else {
                    format!(
                        "{}:{}: Missing language for code block. Code starts with: \"{}\"",
                        file_path, violation.line_number, violation.preview
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_summary(&self, files_scanned: usize, total_violations: usize, fixed: usize) -> Option<String> {
        let file_text = if files_scanned == 1 { "file" } else { "files" };
        let summary = if fixed > 0 {
            format!("Fixed {fixed}/{total_violations} code blocks in {files_scanned} {file_text}")
        } else if total_violations > 0 {
            format!("Found {total_violations} code blocks without a language in {files_scanned} {file_text}")
        } else {
            format!("No issues found in {files_scanned} {file_text}")
        };

        if !self.use_colors {
            return Some(summary);
        }
        let label = if fixed > 0 {
            "Fixed:".green().bold()
        } else if total_violations > 0 {
            "Issues:".yellow().bold()
        } else {
            "Success:".green().bold()
        };
        Some(format!("{label} {summary}"))
    }
}
