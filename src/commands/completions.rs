//! Handler for the `completions` command.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use colored::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use fenceguard_lib::exit_codes;

/// Print the completion script for `shell`, or write it to `output`.
pub fn handle_completions(shell: Shell, output: Option<&Path>) -> i32 {
    let mut command = crate::Cli::command();
    let name = command.get_name().to_string();

    let Some(path) = output else {
        generate(shell, &mut command, name, &mut io::stdout());
        return exit_codes::SUCCESS;
    };

    let written = File::create(path).and_then(|mut file| {
        generate(shell, &mut command, name, &mut file);
        file.flush()
    });
    match written {
        Ok(()) => {
            log::info!("wrote {shell} completions to {}", path.display());
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to write completions to {}: {e}",
                "Error".red().bold(),
                path.display()
            );
            exit_codes::TOOL_ERROR
        }
    }
}
