//! Shared helpers for integration tests: an in-memory thread service and
//! sample bodies.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use fenceguard_lib::github::{
    ApiError, CommentAuthor, CommentId, ThreadApi, ThreadComment, ThreadRef,
};

/// Bodies used across tests
pub struct TestFixtures;

impl TestFixtures {
    /// One unlabelled block on line 2
    pub const UNLABELLED: &'static str = "Here:\n```\nx=1\n```\n";

    /// The same body after fixing
    pub const UNLABELLED_FIXED: &'static str = "Here:\n```python\nx=1\n```\n";

    /// Every block carries a language
    pub const CLEAN: &'static str = "Steps:\n\n```sh\ncargo test\n```\n";

    /// The language is separated from the marker, which the fix leaves alone
    pub const DETACHED_LANGUAGE: &'static str = "``` python\nprint(1)\n```\n";
}

/// A remote call recorded by [`FakeThreadApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { page: u32, per_page: u32 },
    Create(String),
    Update(CommentId, String),
    Delete(CommentId),
    UpdateBody(ThreadRef, String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::List { .. })
    }
}

/// In-memory thread with a comment list and a recorded call log
pub struct FakeThreadApi {
    pub comments: RefCell<Vec<ThreadComment>>,
    pub body: RefCell<Option<String>>,
    pub calls: RefCell<Vec<Call>>,
    next_id: Cell<u64>,
    fail_body_update: bool,
    fail_listing: bool,
    fail_comment_write: bool,
}

impl Default for FakeThreadApi {
    fn default() -> Self {
        Self {
            comments: RefCell::new(Vec::new()),
            body: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1000),
            fail_body_update: false,
            fail_listing: false,
            fail_comment_write: false,
        }
    }
}

impl FakeThreadApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(comments: Vec<ThreadComment>) -> Self {
        let api = Self::new();
        *api.comments.borrow_mut() = comments;
        api
    }

    pub fn failing_body_update(mut self) -> Self {
        self.fail_body_update = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Creating or editing a comment is rejected; deletes still succeed
    pub fn failing_comment_write(mut self) -> Self {
        self.fail_comment_write = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn comment_bodies(&self) -> Vec<String> {
        self.comments.borrow().iter().map(|c| c.body.clone()).collect()
    }
}

impl ThreadApi for FakeThreadApi {
    fn list_comments(
        &self,
        _thread: ThreadRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ThreadComment>, ApiError> {
        self.calls.borrow_mut().push(Call::List { page, per_page });
        if self.fail_listing {
            return Err(ApiError::status("listing comments", 502));
        }
        let skip = ((page - 1) * per_page) as usize;
        Ok(self
            .comments
            .borrow()
            .iter()
            .skip(skip)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    fn create_comment(&self, _thread: ThreadRef, text: &str) -> Result<ThreadComment, ApiError> {
        self.calls.borrow_mut().push(Call::Create(text.to_string()));
        if self.fail_comment_write {
            return Err(ApiError::status("creating comment", 403));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let comment = ThreadComment {
            id: CommentId(id),
            author: CommentAuthor::bot("github-actions[bot]"),
            body: text.to_string(),
        };
        self.comments.borrow_mut().push(comment.clone());
        Ok(comment)
    }

    fn update_comment(&self, id: CommentId, text: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Update(id, text.to_string()));
        if self.fail_comment_write {
            return Err(ApiError::status("updating comment", 403));
        }
        let mut comments = self.comments.borrow_mut();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::status("updating comment", 404))?;
        comment.body = text.to_string();
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.comments.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }

    fn update_thread_body(&self, thread: ThreadRef, text: &str) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::UpdateBody(thread, text.to_string()));
        if self.fail_body_update {
            return Err(ApiError::status("updating issue body", 403));
        }
        *self.body.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

pub fn comment(id: u64, author: CommentAuthor, body: impl Into<String>) -> ThreadComment {
    ThreadComment {
        id: CommentId(id),
        author,
        body: body.into(),
    }
}

/// `count` ordinary comments from people, ids starting at 1
pub fn chatter(count: u64) -> Vec<ThreadComment> {
    (1..=count)
        .map(|i| comment(i, CommentAuthor::user(format!("user{i}")), format!("comment {i}")))
        .collect()
}
