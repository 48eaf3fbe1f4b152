//! Identifiers and records for repositories, threads and comments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repository identifier (`owner/repo`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Error returned when a repository string is not `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected repository in 'owner/repo' form, got '{0}'")]
pub struct InvalidRepoId(pub String);

impl FromStr for RepoId {
    type Err = InvalidRepoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(RepoId::new(*owner, *repo)),
            _ => Err(InvalidRepoId(s.to_string())),
        }
    }
}

/// Whether a thread is a plain issue or a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadKind {
    Issue,
    PullRequest,
}

impl fmt::Display for ThreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadKind::Issue => write!(f, "issue"),
            ThreadKind::PullRequest => write!(f, "pull request"),
        }
    }
}

/// An issue or pull request within the client's repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadRef {
    pub kind: ThreadKind,
    pub number: u64,
}

impl ThreadRef {
    pub fn issue(number: u64) -> Self {
        ThreadRef {
            kind: ThreadKind::Issue,
            number,
        }
    }

    pub fn pull_request(number: u64) -> Self {
        ThreadRef {
            kind: ThreadKind::PullRequest,
            number,
        }
    }
}

impl fmt::Display for ThreadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.number)
    }
}

/// A comment's unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account type as reported by the API (`"User"`, `"Bot"`, `"Organization"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    User,
    Bot,
    #[serde(other)]
    Other,
}

/// Who wrote a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl CommentAuthor {
    pub fn user(login: impl Into<String>) -> Self {
        CommentAuthor {
            login: login.into(),
            account_type: AccountType::User,
        }
    }

    pub fn bot(login: impl Into<String>) -> Self {
        CommentAuthor {
            login: login.into(),
            account_type: AccountType::Bot,
        }
    }
}

/// A comment on a thread, as far as status-comment matching needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadComment {
    pub id: CommentId,
    #[serde(rename = "user")]
    pub author: CommentAuthor,
    #[serde(default)]
    pub body: String,
}
