//!
//! Fence scanning: walks a markdown body as alternating outside/inside regions
//! delimited by triple-backtick lines and reports every fence that opens
//! without a language token.
//!
//! Only lines that start with the marker in column 0 count as fences. Fences
//! indented under list items or blockquotes are not recognized.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// The only fence delimiter this scanner understands
pub const FENCE_MARKER: &str = "```";

/// Maximum number of characters kept in a violation preview
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

const ELLIPSIS: &str = "...";

static FENCE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(\S*)").unwrap());

/// A fence transition observed on a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent<'a> {
    /// Outside -> inside. `language` is the token right after the marker (may be empty).
    Open { language: &'a str },
    /// Inside -> outside, whatever follows the marker
    Close,
}

/// Open/close state machine shared by the scanner and the autofix transform.
///
/// Fences never nest: every marker line toggles the state, so a third
/// consecutive marker opens the next region.
#[derive(Debug, Default, Clone)]
pub struct FenceTracker {
    inside: bool,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last observed line left us inside a fence
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Feed the next line (without its `\n`). Returns the transition, if any.
    pub fn observe<'a>(&mut self, line: &'a str) -> Option<FenceEvent<'a>> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !is_fence_line(line) {
            return None;
        }

        if self.inside {
            self.inside = false;
            return Some(FenceEvent::Close);
        }

        self.inside = true;
        let language = FENCE_OPEN_REGEX
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str().trim());
        Some(FenceEvent::Open { language })
    }
}

/// True when `line` starts with the fence marker in column 0
pub fn is_fence_line(line: &str) -> bool {
    line.starts_with(FENCE_MARKER)
}

/// One fence-open line that lacks a language token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// 1-based line number of the opening fence
    pub line_number: usize,
    /// First meaningful line of the block, trimmed and possibly truncated
    pub preview: String,
}

impl Violation {
    /// Human-readable description used in reports and status comments
    pub fn describe(&self) -> String {
        format!(
            "Line {}: Missing language for code block. Code starts with: \"{}\"",
            self.line_number, self.preview
        )
    }
}

/// Violations found in one body, in ascending line order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanResult {
    violations: Vec<Violation>,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Scanner with a configurable preview length
#[derive(Debug, Clone, Copy)]
pub struct FenceScanner {
    preview_length: usize,
}

impl Default for FenceScanner {
    fn default() -> Self {
        Self {
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

impl FenceScanner {
    pub fn new(preview_length: usize) -> Self {
        Self { preview_length }
    }

    pub fn scan(&self, body: &str) -> ScanResult {
        let lines: Vec<&str> = body.lines().collect();
        let mut tracker = FenceTracker::new();
        let mut violations = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if let Some(FenceEvent::Open { language }) = tracker.observe(line)
                && language.is_empty()
            {
                violations.push(Violation {
                    line_number: i + 1,
                    preview: self.preview_after(&lines[i + 1..]),
                });
            }
        }

        // An unterminated trailing fence is not reported on its own
        if tracker.is_inside() {
            log::debug!("body ends inside an unterminated fence");
        }

        ScanResult { violations }
    }

    /// First non-blank line before the closing marker, or "" if there is none
    fn preview_after(&self, rest: &[&str]) -> String {
        for line in rest {
            if is_fence_line(line) {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return truncate_preview(trimmed, self.preview_length);
            }
        }
        String::new()
    }
}

/// Scan `body` with the default preview length
pub fn scan(body: &str) -> ScanResult {
    FenceScanner::default().scan(body)
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
