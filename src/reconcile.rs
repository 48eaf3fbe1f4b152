//! Status comment reconciliation.
//!
//! A thread carries at most one status comment, recognized by a marker
//! embedded in its body and by an author that is (or acts as) the
//! automation. Given the desired comment text, [`decide`] picks the single
//! mutation that brings the thread in line: create, update, delete, or
//! nothing at all.

use crate::github::{
    AccountType, ApiError, CommentAuthor, CommentId, ThreadApi, ThreadComment, ThreadRef,
};
use crate::scanner::ScanResult;

/// Invisible sentinel that identifies our status comment
pub const DEFAULT_MARKER: &str = "<!-- fenceguard:code-block-language -->";

/// Accounts that are always treated as the automation
pub const DEFAULT_BOT_LOGINS: &[&str] = &["github-actions[bot]"];

/// Comments fetched per page while looking for the status comment
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// How a comment author relates to the automation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorKind {
    /// A bot account, by type flag or well-known login
    Bot,
    /// The actor running this workflow
    HumanActingAsWorkflow,
    Other,
}

/// Who counts as "us" when matching comments
#[derive(Debug, Clone)]
pub struct BotIdentity {
    logins: Vec<String>,
    actor: Option<String>,
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            logins: DEFAULT_BOT_LOGINS.iter().map(|s| s.to_string()).collect(),
            actor: None,
        }
    }
}

impl BotIdentity {
    pub fn new(logins: Vec<String>, actor: Option<String>) -> Self {
        Self {
            logins,
            actor: actor.filter(|a| !a.is_empty()),
        }
    }

    pub fn classify(&self, author: &CommentAuthor) -> AuthorKind {
        if author.account_type == AccountType::Bot || self.logins.contains(&author.login) {
            AuthorKind::Bot
        } else if self.actor.as_deref() == Some(author.login.as_str()) {
            AuthorKind::HumanActingAsWorkflow
        } else {
            AuthorKind::Other
        }
    }
}

/// Recognizes the status comment among all comments on a thread
#[derive(Debug, Clone)]
pub struct StatusCommentMatcher {
    marker: String,
    identity: BotIdentity,
}

impl StatusCommentMatcher {
    pub fn new(marker: impl Into<String>, identity: BotIdentity) -> Self {
        Self {
            marker: marker.into(),
            identity,
        }
    }

    pub fn is_status_comment(&self, comment: &ThreadComment) -> bool {
        self.identity.classify(&comment.author) != AuthorKind::Other
            && comment.body.contains(&self.marker)
    }
}

/// Page through the thread's comments until the first status comment.
///
/// Stops at the first match (lowest page, earliest in page) or once a page
/// comes back shorter than `page_size`. Later duplicates are not reported.
pub fn find_status_comment(
    api: &dyn ThreadApi,
    thread: ThreadRef,
    matcher: &StatusCommentMatcher,
    page_size: u32,
) -> Result<Option<ThreadComment>, ApiError> {
    let page_size = page_size.max(1);
    let mut page = 1;

    loop {
        let comments = api.list_comments(thread, page, page_size)?;
        let fetched = comments.len();
        log::debug!("page {page}: {fetched} comment(s)");

        if let Some(found) = comments.into_iter().find(|c| matcher.is_status_comment(c)) {
            log::info!("found status comment {} on {thread}", found.id);
            return Ok(Some(found));
        }

        // A short (or empty) page is the last one
        if fetched < page_size as usize {
            return Ok(None);
        }
        page += 1;
    }
}

/// The single remote mutation needed for the status comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Create(String),
    Update { id: CommentId, text: String },
    Delete(CommentId),
    NoOp,
}

/// Pick the mutation that makes the status comment read `desired`.
///
/// `None` means the thread should carry no status comment at all.
pub fn decide(desired: Option<&str>, existing: Option<&ThreadComment>) -> Decision {
    match (desired, existing) {
        (Some(text), None) => Decision::Create(text.to_string()),
        (Some(text), Some(comment)) if comment.body != text => Decision::Update {
            id: comment.id,
            text: text.to_string(),
        },
        (Some(_), Some(_)) => Decision::NoOp,
        (None, Some(comment)) => Decision::Delete(comment.id),
        (None, None) => Decision::NoOp,
    }
}

/// Scan-only decision: report violations, or clear a stale report
pub fn reconcile(
    result: &ScanResult,
    existing: Option<&ThreadComment>,
    messages: &StatusMessages,
) -> Decision {
    if result.is_clean() {
        decide(None, existing)
    } else {
        decide(Some(&messages.violation_report(result)), existing)
    }
}

/// Carry out `decision` against the thread
pub fn apply(api: &dyn ThreadApi, thread: ThreadRef, decision: &Decision) -> Result<(), ApiError> {
    match decision {
        Decision::Create(text) => {
            let comment = api.create_comment(thread, text)?;
            log::info!("created status comment {} on {thread}", comment.id);
        }
        Decision::Update { id, text } => {
            api.update_comment(*id, text)?;
            log::info!("updated status comment {id} on {thread}");
        }
        Decision::Delete(id) => {
            api.delete_comment(*id)?;
            log::info!("deleted status comment {id} on {thread}");
        }
        Decision::NoOp => log::info!("status comment on {thread} already up to date"),
    }
    Ok(())
}

/// Builds the text of the status comment
#[derive(Debug, Clone)]
pub struct StatusMessages {
    marker: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl StatusMessages {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Detail comment listing every violation
    pub fn violation_report(&self, result: &ScanResult) -> String {
        let details: Vec<String> = result.iter().map(|v| v.describe()).collect();
        format!(
            "{}\n\
             ### Code blocks without a language\n\
             \n\
             Some fenced code blocks in this description do not declare a language. \
             Please add one after the opening backticks (for example ```` ```python ````).\n\
             \n\
             ```text\n\
             {}\n\
             ```\n",
            self.marker,
            details.join("\n")
        )
    }

    /// Notice posted after the body was rewritten
    pub fn fix_notice(&self, language: &str) -> String {
        format!(
            "{}\n\
             ### Code blocks tagged automatically\n\
             \n\
             Fenced code blocks without a language were tagged as `{language}`. \
             Please check the description and adjust the language where it is wrong.\n",
            self.marker
        )
    }
}
