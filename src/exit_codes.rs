//! Exit codes for fenceguard
//!
//! A blocking report and an operational failure both exit with 1, so a
//! workflow step fails either way; the two are told apart by what is printed
//! to stderr.

/// Success - Body clean, stale report removed, or body fixed
pub const SUCCESS: i32 = 0;

/// Unlabelled fences found and reported without fixing
pub const VIOLATIONS_FOUND: i32 = 1;

/// Tool error - Missing inputs, unreadable event payload, or failed remote call
pub const TOOL_ERROR: i32 = 1;
