//! Handler for the `scan` command: offline scanning of local files or stdin.

use colored::*;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use fenceguard_lib::autofix::Autofixer;
use fenceguard_lib::config::Settings;
use fenceguard_lib::exit_codes;
use fenceguard_lib::output::{OutputFormat, OutputWriter, format_all_as_json};
use fenceguard_lib::scanner::{FenceScanner, ScanResult};

const STDIN_NAME: &str = "<stdin>";

/// Options for a local scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub paths: Vec<PathBuf>,
    pub fix: bool,
    pub output_format: OutputFormat,
    pub quiet: bool,
}

/// Scan each path (or stdin) and print the findings.
///
/// Stdin is read when no path is given or the only path is `-`. Exit code is
/// 1 when unlabelled fences remain after any fixing, when a file cannot be
/// read or written, or when `-` is mixed with file paths.
pub fn handle_scan(options: ScanOptions, settings: &Settings) -> i32 {
    let scanner = FenceScanner::new(settings.global.preview_length.get() as usize);
    let fixer = Autofixer::new(settings.global.default_language.clone());

    let stdin_args = options.paths.iter().filter(|p| p.as_os_str() == "-").count();
    if stdin_args > 0 && stdin_args < options.paths.len() {
        eprintln!(
            "{}: '-' (stdin) cannot be combined with file paths",
            "Error".red().bold()
        );
        return exit_codes::TOOL_ERROR;
    }
    if options.paths.is_empty() || stdin_args > 0 {
        return scan_stdin(&options, &scanner, &fixer);
    }

    let writer = OutputWriter::new(options.quiet);
    let formatter = options
        .output_format
        .create_formatter(io::stdout().is_terminal());

    let mut results: Vec<(String, ScanResult)> = Vec::new();
    let mut total_violations = 0;
    let mut total_fixed = 0;
    let mut had_error = false;

    for path in &options.paths {
        let display = path.display().to_string();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{}: Failed to read {display}: {e}", "Error".red().bold());
                had_error = true;
                continue;
            }
        };

        let result = scanner.scan(&content);
        total_violations += result.len();

        let remaining = if options.fix && !result.is_clean() {
            let fix = fixer.fix(&content);
            if fix.changed {
                if let Err(e) = fs::write(path, &fix.body) {
                    eprintln!("{}: Failed to write {display}: {e}", "Error".red().bold());
                    had_error = true;
                    result
                } else {
                    log::info!("{display}: tagged {} fence(s)", fix.rewritten_lines.len());
                    total_fixed += fix.rewritten_lines.len();
                    scanner.scan(&fix.body)
                }
            } else {
                result
            }
        } else {
            result
        };

        if let Err(e) = writer.writeln(&formatter.format_violations(&remaining, &display)) {
            log::warn!("failed to write output: {e}");
        }
        results.push((display, remaining));
    }

    let remaining_total: usize = results.iter().map(|(_, r)| r.len()).sum();

    if options.output_format == OutputFormat::Json {
        if let Err(e) = writer.write_document(&format_all_as_json(&results)) {
            log::warn!("failed to write output: {e}");
        }
    } else if let Some(summary) =
        formatter.format_summary(results.len(), total_violations, total_fixed)
        && let Err(e) = writer.writeln(&format!("\n{summary}"))
    {
        log::warn!("failed to write output: {e}");
    }

    if had_error || remaining_total > 0 {
        exit_codes::VIOLATIONS_FOUND
    } else {
        exit_codes::SUCCESS
    }
}

/// With `--fix` the rewritten content goes to stdout; otherwise the report does.
fn scan_stdin(options: &ScanOptions, scanner: &FenceScanner, fixer: &Autofixer) -> i32 {
    let mut content = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut content) {
        eprintln!("{}: Failed to read stdin: {e}", "Error".red().bold());
        return exit_codes::TOOL_ERROR;
    }

    if options.fix {
        let fix = fixer.fix(&content);
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(fix.body.as_bytes()) {
            eprintln!("{}: Failed to write output: {e}", "Error".red().bold());
            return exit_codes::TOOL_ERROR;
        }
        return if scanner.scan(&fix.body).is_clean() {
            exit_codes::SUCCESS
        } else {
            exit_codes::VIOLATIONS_FOUND
        };
    }

    let result = scanner.scan(&content);
    let writer = OutputWriter::new(options.quiet);
    let output = match options.output_format {
        OutputFormat::Json => format_all_as_json(&[(STDIN_NAME.to_string(), result.clone())]),
        format => format
            .create_formatter(io::stdout().is_terminal())
            .format_violations(&result, STDIN_NAME),
    };
    let written = if options.output_format == OutputFormat::Json {
        writer.write_document(&output)
    } else {
        writer.writeln(&output)
    };
    if let Err(e) = written {
        log::warn!("failed to write output: {e}");
    }

    if result.is_clean() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VIOLATIONS_FOUND
    }
}
