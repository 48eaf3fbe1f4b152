use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::*;
use std::path::PathBuf;
use std::process;

use fenceguard_lib::config;
use fenceguard_lib::exit_codes;
use fenceguard_lib::output::OutputFormat;

mod commands;

use commands::remote::RemoteArgs;
use commands::scan::ScanOptions;

#[derive(Parser)]
#[command(name = "fenceguard", author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file path (defaults to .fenceguard.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show detailed log output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report unlabelled code blocks on the triggering issue or pull request
    Check(RemoteArgs),

    /// Tag unlabelled code blocks in the triggering issue or pull request body
    Fix(RemoteArgs),

    /// Scan local markdown files (or stdin) without talking to the remote
    Scan {
        /// Files to scan; reads stdin when empty or "-"
        paths: Vec<PathBuf>,

        /// Rewrite files in place (stdin: print the fixed content)
        #[arg(short, long)]
        fix: bool,

        /// Output format for the findings
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Write the script to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let code = match cli.command {
        Commands::Check(args) => commands::check::handle_check(args, config_path, cli.quiet),
        Commands::Fix(args) => commands::fix::handle_fix(args, config_path, cli.quiet),
        Commands::Scan {
            paths,
            fix,
            output_format,
        } => match config::load_settings(config_path) {
            Ok(settings) => commands::scan::handle_scan(
                ScanOptions {
                    paths,
                    fix,
                    output_format,
                    quiet: cli.quiet,
                },
                &settings,
            ),
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit_codes::TOOL_ERROR
            }
        },
        Commands::Completions { shell, output } => {
            commands::completions::handle_completions(shell, output.as_deref())
        }
    };

    process::exit(code);
}
