//! Output formatting for local scans
//!
//! The `scan` command prints its findings in one of a few formats: plain
//! text for terminals, GitHub Actions annotations, or JSON.

use crate::scanner::ScanResult;
use std::io::{self, Write};

pub mod formatters;

pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the violations found in one file
    fn format_violations(&self, result: &ScanResult, file_path: &str) -> String;

    /// Format a summary of results across all files
    fn format_summary(&self, _files_scanned: usize, _total_violations: usize, _fixed: usize) -> Option<String> {
        None
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `file:line: message` lines with colors
    #[default]
    Text,
    /// GitHub Actions annotation format
    #[value(name = "github")]
    GitHub,
    /// One JSON document for all files
    Json,
}

impl OutputFormat {
    /// Create a formatter instance for this format
    pub fn create_formatter(&self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text if use_colors => Box::new(TextFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::without_colors()),
            OutputFormat::GitHub => Box::new(GitHubFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}

/// Output writer that handles quiet mode
pub struct OutputWriter {
    quiet: bool,
}

impl OutputWriter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Write a line to stdout unless quiet; empty content is skipped
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        if self.quiet || content.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")
    }

    /// Machine-readable output is written even in quiet mode
    pub fn write_document(&self, content: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")
    }
}
