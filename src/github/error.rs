//! Remote API error types.
//!
//! Nothing here is retried: every failure propagates to the top-level handler
//! and ends the run with a non-zero exit code. The kind is kept so the
//! operator message says whether the request never completed, was rejected,
//! or came back in a shape we could not read.

use std::fmt;
use thiserror::Error;

/// Broad category of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Network, TLS or protocol failure before a response arrived
    Transport,
    /// The server answered with a non-success HTTP status
    Status(u16),
    /// The response body could not be decoded
    Decode,
}

/// A failed call to the thread/comment API
#[derive(Debug, Error)]
pub struct ApiError {
    /// What we were trying to do, e.g. "listing comments"
    pub operation: String,

    pub kind: ApiErrorKind,

    /// The underlying HTTP client error, if there is one
    #[source]
    pub source: Option<ureq::Error>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::Status(code) => {
                write!(f, "{} failed (HTTP {}{})", self.operation, code, status_hint(code))
            }
            ApiErrorKind::Transport => write!(f, "{} failed: request did not complete", self.operation),
            ApiErrorKind::Decode => write!(f, "{} failed: unexpected response body", self.operation),
        }
    }
}

impl ApiError {
    /// Categorizes a `ureq` error
    pub fn from_ureq(operation: impl Into<String>, err: ureq::Error) -> Self {
        let kind = match &err {
            ureq::Error::StatusCode(code) => ApiErrorKind::Status(*code),
            ureq::Error::Json(_) => ApiErrorKind::Decode,
            _ => ApiErrorKind::Transport,
        };
        Self {
            operation: operation.into(),
            kind,
            source: Some(err),
        }
    }

    /// An HTTP status failure without an underlying client error
    pub fn status(operation: impl Into<String>, code: u16) -> Self {
        Self {
            operation: operation.into(),
            kind: ApiErrorKind::Status(code),
            source: None,
        }
    }
}

fn status_hint(code: u16) -> &'static str {
    match code {
        401 => ": bad credentials",
        403 => ": forbidden or rate limited",
        404 => ": not found or no access",
        422 => ": rejected by validation",
        500..=599 => ": server error",
        _ => "",
    }
}
