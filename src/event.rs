//! Reading the triggering event payload.
//!
//! Only the thread's number and body are used. Issue events carry them under
//! `issue`, pull request events under `pull_request`.

use crate::github::{ThreadKind, ThreadRef};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Failed to read event payload at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Event payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event payload has neither an 'issue' nor a 'pull_request' object")]
    NoThread,

    #[error("Event payload field '{0}' is missing or has the wrong type")]
    Field(String),
}

/// The thread an event is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadEvent {
    pub thread: ThreadRef,
    pub body: String,
}

impl ThreadEvent {
    pub fn from_file(path: &Path) -> Result<Self, EventError> {
        let content = fs::read_to_string(path).map_err(|source| EventError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, EventError> {
        let payload: Value = serde_json::from_str(content)?;

        let (key, kind) = [("issue", ThreadKind::Issue), ("pull_request", ThreadKind::PullRequest)]
            .into_iter()
            .find(|(key, _)| payload.get(key).is_some_and(Value::is_object))
            .ok_or(EventError::NoThread)?;
        let object = &payload[key];

        let number = object
            .get("number")
            .and_then(Value::as_u64)
            .ok_or_else(|| EventError::Field(format!("{key}.number")))?;

        // An empty description comes through as `null`
        let body = match object.get("body") {
            Some(Value::String(body)) => body.clone(),
            Some(Value::Null) => String::new(),
            _ => return Err(EventError::Field(format!("{key}.body"))),
        };

        Ok(ThreadEvent {
            thread: ThreadRef { kind, number },
            body,
        })
    }
}
