//! Handler for the `check` command.

use std::path::Path;

use super::remote::{self, RemoteArgs, Variant};

/// Report unlabelled fences on the triggering thread; exits 1 when any are found.
pub fn handle_check(args: RemoteArgs, config_path: Option<&Path>, quiet: bool) -> i32 {
    remote::run(args, config_path, Variant::Check, quiet)
}
