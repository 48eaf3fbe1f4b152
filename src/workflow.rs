//! The two per-event workflows.
//!
//! `check` reports unlabelled fences in a status comment and blocks the run;
//! `fix` rewrites the thread body and leaves a notice instead. Both clear a
//! stale status comment once the body is clean. Every remote call is made in
//! order and any failure aborts the run; nothing is rolled back.

use anyhow::{Context, Result};

use crate::autofix::Autofixer;
use crate::config::Settings;
use crate::event::ThreadEvent;
use crate::exit_codes;
use crate::github::ThreadApi;
use crate::reconcile::{
    self, Decision, StatusCommentMatcher, StatusMessages, find_status_comment,
};
use crate::scanner::{FenceScanner, ScanResult};

/// How a workflow run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No unlabelled fences (any stale status comment was removed)
    Clean,
    /// Violations reported in the status comment; the check should block
    Reported { violations: usize },
    /// The body was rewritten and the notice comment posted
    Fixed { rewritten: usize },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Clean | Outcome::Fixed { .. } => exit_codes::SUCCESS,
            Outcome::Reported { .. } => exit_codes::VIOLATIONS_FOUND,
        }
    }
}

/// Drives scanning and comment reconciliation for one thread
pub struct Workflow<'a> {
    api: &'a dyn ThreadApi,
    scanner: FenceScanner,
    fixer: Autofixer,
    matcher: StatusCommentMatcher,
    messages: StatusMessages,
    page_size: u32,
}

impl<'a> Workflow<'a> {
    pub fn new(api: &'a dyn ThreadApi, settings: &Settings, actor: Option<String>) -> Self {
        let global = &settings.global;
        Self {
            api,
            scanner: FenceScanner::new(global.preview_length.get() as usize),
            fixer: Autofixer::new(global.default_language.clone()),
            matcher: StatusCommentMatcher::new(global.marker.clone(), settings.bot_identity(actor)),
            messages: StatusMessages::new(global.marker.clone()),
            page_size: global.page_size.get(),
        }
    }

    /// Scan-only: report violations, or clear a stale report
    pub fn run_check(&self, event: &ThreadEvent) -> Result<Outcome> {
        let result = self.scanner.scan(&event.body);
        log_scan(event, &result);
        self.report(event, &result)
    }

    /// Auto-fix: rewrite unlabelled fences, then post the notice
    pub fn run_fix(&self, event: &ThreadEvent) -> Result<Outcome> {
        let result = self.scanner.scan(&event.body);
        log_scan(event, &result);
        if result.is_clean() {
            return self.report(event, &result);
        }

        let fix = self.fixer.fix(&event.body);
        if !fix.changed {
            log::warn!(
                "{}: unlabelled fences could not be rewritten, reporting instead",
                event.thread
            );
            return self.report(event, &result);
        }

        self.api
            .update_thread_body(event.thread, &fix.body)
            .with_context(|| format!("Failed to update the body of {}", event.thread))?;
        log::info!(
            "{}: tagged {} fence(s) as '{}'",
            event.thread,
            fix.rewritten_lines.len(),
            self.fixer.language()
        );

        let remaining = self.scanner.scan(&fix.body);
        if !remaining.is_clean() {
            log::warn!(
                "{}: {} unlabelled fence(s) left after fixing",
                event.thread,
                remaining.len()
            );
        }

        let notice = self.messages.fix_notice(self.fixer.language());
        let existing = self.lookup(event)?;
        let decision = reconcile::decide(Some(&notice), existing.as_ref());
        self.apply(event, &decision)?;

        Ok(Outcome::Fixed {
            rewritten: fix.rewritten_lines.len(),
        })
    }

    fn report(&self, event: &ThreadEvent, result: &ScanResult) -> Result<Outcome> {
        let existing = self.lookup(event)?;
        let decision = reconcile::reconcile(result, existing.as_ref(), &self.messages);
        self.apply(event, &decision)?;

        Ok(if result.is_clean() {
            Outcome::Clean
        } else {
            Outcome::Reported {
                violations: result.len(),
            }
        })
    }

    fn lookup(&self, event: &ThreadEvent) -> Result<Option<crate::github::ThreadComment>> {
        find_status_comment(self.api, event.thread, &self.matcher, self.page_size)
            .with_context(|| format!("Failed to list comments on {}", event.thread))
    }

    fn apply(&self, event: &ThreadEvent, decision: &Decision) -> Result<()> {
        reconcile::apply(self.api, event.thread, decision)
            .with_context(|| format!("Failed to update the status comment on {}", event.thread))
    }
}

fn log_scan(event: &ThreadEvent, result: &ScanResult) {
    if result.is_clean() {
        log::info!("{}: all fenced code blocks declare a language", event.thread);
        return;
    }
    log::info!(
        "{}: {} fenced code block(s) without a language",
        event.thread,
        result.len()
    );
    for violation in result {
        log::debug!("{}", violation.describe());
    }
}
