//! Handler for the `fix` command.

use std::path::Path;

use super::remote::{self, RemoteArgs, Variant};

/// Tag unlabelled fences in the triggering thread's body and post a notice.
pub fn handle_fix(args: RemoteArgs, config_path: Option<&Path>, quiet: bool) -> i32 {
    remote::run(args, config_path, Variant::Fix, quiet)
}
