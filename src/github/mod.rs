//! Access to issue/pull request threads and their comments.
//!
//! The workflows only talk to the remote service through [`ThreadApi`], so
//! tests can drive them with an in-memory implementation. [`RestClient`] is
//! the production implementation over the GitHub REST API.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_URL, RestClient};
pub use error::{ApiError, ApiErrorKind};
pub use types::{
    AccountType, CommentAuthor, CommentId, InvalidRepoId, RepoId, ThreadComment, ThreadKind,
    ThreadRef,
};

/// Operations the reconciler needs from the remote thread service.
///
/// Implementations are scoped to one repository.
pub trait ThreadApi {
    /// One page (1-based) of comments on `thread`, oldest first
    fn list_comments(
        &self,
        thread: ThreadRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ThreadComment>, ApiError>;

    fn create_comment(&self, thread: ThreadRef, text: &str) -> Result<ThreadComment, ApiError>;

    fn update_comment(&self, id: CommentId, text: &str) -> Result<(), ApiError>;

    fn delete_comment(&self, id: CommentId) -> Result<(), ApiError>;

    /// Replace the issue or pull request description
    fn update_thread_body(&self, thread: ThreadRef, text: &str) -> Result<(), ApiError>;
}
