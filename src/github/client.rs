//! Blocking REST client scoped to a single repository.
//!
//! Every request is issued and awaited in turn; there is no retry, no
//! timeout beyond the transport's own, and no background work.

use serde::Serialize;
use ureq::Agent;

use super::error::ApiError;
use super::types::{CommentId, RepoId, ThreadComment, ThreadKind, ThreadRef};
use super::ThreadApi;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("fenceguard/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct BodyPayload<'a> {
    body: &'a str,
}

/// A GitHub REST client scoped to one repository.
///
/// All thread and comment operations target the same repository, so the
/// `ThreadApi` methods take thread numbers and comment ids only.
#[derive(Clone)]
pub struct RestClient {
    agent: Agent,
    api_url: String,
    token: String,
    repo: RepoId,
}

impl RestClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, repo: RepoId) -> Self {
        Self {
            agent: Agent::new_with_defaults(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            repo,
        }
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repo.owner, self.repo.repo, path
        )
    }

    fn authorize<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("api_url", &self.api_url)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl ThreadApi for RestClient {
    fn list_comments(
        &self,
        thread: ThreadRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ThreadComment>, ApiError> {
        const OP: &str = "listing comments";
        let url = self.repo_url(&format!("issues/{}/comments", thread.number));
        log::debug!("GET {url} page={page} per_page={per_page}");

        let mut response = self
            .authorize(self.agent.get(&url))
            .query("per_page", per_page.to_string())
            .query("page", page.to_string())
            .call()
            .map_err(|e| ApiError::from_ureq(OP, e))?;

        response
            .body_mut()
            .read_json::<Vec<ThreadComment>>()
            .map_err(|e| ApiError::from_ureq(OP, e))
    }

    fn create_comment(&self, thread: ThreadRef, text: &str) -> Result<ThreadComment, ApiError> {
        const OP: &str = "creating comment";
        let url = self.repo_url(&format!("issues/{}/comments", thread.number));
        log::debug!("POST {url}");

        let mut response = self
            .authorize(self.agent.post(&url))
            .send_json(BodyPayload { body: text })
            .map_err(|e| ApiError::from_ureq(OP, e))?;

        response
            .body_mut()
            .read_json::<ThreadComment>()
            .map_err(|e| ApiError::from_ureq(OP, e))
    }

    fn update_comment(&self, id: CommentId, text: &str) -> Result<(), ApiError> {
        let url = self.repo_url(&format!("issues/comments/{id}"));
        log::debug!("PATCH {url}");

        self.authorize(self.agent.patch(&url))
            .send_json(BodyPayload { body: text })
            .map_err(|e| ApiError::from_ureq("updating comment", e))?;
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        let url = self.repo_url(&format!("issues/comments/{id}"));
        log::debug!("DELETE {url}");

        self.authorize(self.agent.delete(&url))
            .call()
            .map_err(|e| ApiError::from_ureq("deleting comment", e))?;
        Ok(())
    }

    fn update_thread_body(&self, thread: ThreadRef, text: &str) -> Result<(), ApiError> {
        let (path, op) = match thread.kind {
            ThreadKind::Issue => (format!("issues/{}", thread.number), "updating issue body"),
            ThreadKind::PullRequest => (
                format!("pulls/{}", thread.number),
                "updating pull request body",
            ),
        };
        let url = self.repo_url(&path);
        log::debug!("PATCH {url}");

        self.authorize(self.agent.patch(&url))
            .send_json(BodyPayload { body: text })
            .map_err(|e| ApiError::from_ureq(op, e))?;
        Ok(())
    }
}
