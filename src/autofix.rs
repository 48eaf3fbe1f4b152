//!
//! Body auto-fix: tags every unlabelled fence-open with a fixed default
//! language. Uses the same open/close tracking as the scanner, so marker
//! lines inside a block are never touched, and keeps every line terminator
//! exactly as it was.

use crate::scanner::{FENCE_MARKER, FenceEvent, FenceTracker};

/// Language written into unlabelled fences when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "python";

/// Result of running the transform over a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofixOutcome {
    /// The rewritten body (identical to the input when `changed` is false)
    pub body: String,
    /// Whether any line was rewritten
    pub changed: bool,
    /// 1-based numbers of the rewritten fence-open lines
    pub rewritten_lines: Vec<usize>,
}

/// Rewrites unlabelled fence-opens to carry `language`
#[derive(Debug, Clone)]
pub struct Autofixer {
    language: String,
}

impl Default for Autofixer {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Autofixer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn fix(&self, body: &str) -> AutofixOutcome {
        let mut tracker = FenceTracker::new();
        let mut fixed = String::with_capacity(body.len() + self.language.len());
        let mut rewritten_lines = Vec::new();

        for (i, segment) in body.split_inclusive('\n').enumerate() {
            let (content, terminator) = split_terminator(segment);

            let is_bare_open = matches!(
                tracker.observe(content),
                Some(FenceEvent::Open { language }) if language.is_empty()
            ) && content[FENCE_MARKER.len()..].trim().is_empty();

            if is_bare_open {
                fixed.push_str(FENCE_MARKER);
                fixed.push_str(&self.language);
                fixed.push_str(terminator);
                rewritten_lines.push(i + 1);
            } else {
                fixed.push_str(segment);
            }
        }

        let changed = !rewritten_lines.is_empty();
        if changed {
            log::debug!(
                "tagged {} fence(s) with '{}' at lines {:?}",
                rewritten_lines.len(),
                self.language,
                rewritten_lines
            );
        }

        AutofixOutcome {
            body: fixed,
            changed,
            rewritten_lines,
        }
    }
}

/// Tag unlabelled fences in `body` with [`DEFAULT_LANGUAGE`]
pub fn autofix(body: &str) -> AutofixOutcome {
    Autofixer::default().fix(body)
}

/// Split a segment produced by `split_inclusive('\n')` into content and its
/// original line terminator (`""`, `"\n"` or `"\r\n"`).
fn split_terminator(segment: &str) -> (&str, &str) {
    if let Some(content) = segment.strip_suffix("\r\n") {
        (content, &segment[content.len()..])
    } else if let Some(content) = segment.strip_suffix('\n') {
        (content, &segment[content.len()..])
    } else {
        (segment, "")
    }
}
