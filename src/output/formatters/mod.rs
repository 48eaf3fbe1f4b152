//! Output formatter implementations

pub mod github;
pub mod json;
pub mod text;

pub use github::GitHubFormatter;
pub use json::{JsonFormatter, format_all_as_json};
pub use text::TextFormatter;
