//! Fenced code block language checks for issue and pull request bodies.
//!
//! The [`scanner`] finds fences that open without a language token, the
//! [`autofix`] transform tags them with a default language, and the
//! [`reconcile`] module keeps a single status comment on the thread in sync
//! with the result. [`workflow`] ties these to a [`github::ThreadApi`].

pub mod autofix;
pub mod config;
pub mod event;
pub mod exit_codes;
pub mod github;
pub mod output;
pub mod reconcile;
pub mod scanner;
pub mod workflow;

pub use autofix::{AutofixOutcome, Autofixer, autofix};
pub use reconcile::{Decision, decide, reconcile};
pub use scanner::{FenceScanner, ScanResult, Violation, scan};
pub use workflow::{Outcome, Workflow};
