//! Command handlers for the fenceguard CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to. Handlers return the process exit code.

pub mod check;
pub mod completions;
pub mod fix;
pub mod remote;
pub mod scan;
