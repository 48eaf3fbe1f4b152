//! Shared plumbing for the commands that talk to the remote thread.

use clap::Args;
use colored::*;
use std::path::{Path, PathBuf};

use fenceguard_lib::config::{self, EnvConfig, RemoteInputs};
use fenceguard_lib::event::ThreadEvent;
use fenceguard_lib::exit_codes;
use fenceguard_lib::github::RestClient;
use fenceguard_lib::workflow::{Outcome, Workflow};

/// Inputs normally provided by the CI environment
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// API token used for every remote call
    #[arg(long, env = config::ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// Repository in owner/repo form
    #[arg(long, env = config::ENV_REPOSITORY)]
    pub repository: Option<String>,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = config::ENV_EVENT_PATH)]
    pub event_path: Option<PathBuf>,

    /// Login of the account running the workflow
    #[arg(long, env = config::ENV_ACTOR)]
    pub actor: Option<String>,

    /// REST API base URL (for GitHub Enterprise Server)
    #[arg(long, env = config::ENV_API_URL)]
    pub api_url: Option<String>,
}

impl From<RemoteArgs> for RemoteInputs {
    fn from(args: RemoteArgs) -> Self {
        RemoteInputs {
            token: args.token,
            repository: args.repository,
            event_path: args.event_path,
            actor: args.actor,
            api_url: args.api_url,
        }
    }
}

/// Which workflow to run against the thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Check,
    Fix,
}

/// Validate inputs, load the event and run the workflow
pub fn run(args: RemoteArgs, config_path: Option<&Path>, variant: Variant, quiet: bool) -> i32 {
    // Configuration problems stop the run before any remote call
    let env = match EnvConfig::from_inputs(args.into()) {
        Ok(env) => env,
        Err(e) => return report_error(&e.to_string()),
    };
    let settings = match config::load_settings(config_path) {
        Ok(settings) => settings,
        Err(e) => return report_error(&e.to_string()),
    };
    let event = match ThreadEvent::from_file(&env.event_path) {
        Ok(event) => event,
        Err(e) => return report_error(&e.to_string()),
    };
    log::debug!("running {variant:?} with {env:?}");

    let client = RestClient::new(env.api_url.clone(), env.token.clone(), env.repo.clone());
    let workflow = Workflow::new(&client, &settings, env.actor.clone());
    let result = match variant {
        Variant::Check => workflow.run_check(&event),
        Variant::Fix => workflow.run_fix(&event),
    };

    match result {
        Ok(outcome) => {
            if !quiet {
                print_outcome(&env, &event, &outcome);
            }
            outcome.exit_code()
        }
        Err(e) => report_error(&format!("{e:#}")),
    }
}

fn print_outcome(env: &EnvConfig, event: &ThreadEvent, outcome: &Outcome) {
    let target = format!("{} {}", env.repo, event.thread);
    match outcome {
        Outcome::Clean => println!(
            "{} all fenced code blocks in {target} declare a language",
            "Success:".green().bold()
        ),
        Outcome::Reported { violations } => println!(
            "{} {violations} fenced code block(s) in {target} are missing a language",
            "Issues:".yellow().bold()
        ),
        Outcome::Fixed { rewritten } => println!(
            "{} tagged {rewritten} fenced code block(s) in {target}",
            "Fixed:".green().bold()
        ),
    }
}

fn report_error(message: &str) -> i32 {
    eprintln!("{}: {}", "Error".red().bold(), message);
    exit_codes::TOOL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fenceguard_lib::config::{
        ConfigError, ENV_ACTOR, ENV_API_URL, ENV_EVENT_PATH, ENV_REPOSITORY, ENV_TOKEN,
    };
    use fenceguard_lib::github::{DEFAULT_API_URL, RepoId};
    use serial_test::serial;

    const REMOTE_VARS: [&str; 5] = [
        ENV_TOKEN,
        ENV_REPOSITORY,
        ENV_EVENT_PATH,
        ENV_ACTOR,
        ENV_API_URL,
    ];

    #[derive(Parser)]
    struct RemoteCli {
        #[command(flatten)]
        remote: RemoteArgs,
    }

    /// Parse `args` with only `vars` set, then validate as `run` does
    fn resolve(vars: &[(&str, &str)], args: &[&str]) -> Result<EnvConfig, ConfigError> {
        // SAFETY: every test that touches the environment is #[serial]
        unsafe {
            for var in REMOTE_VARS {
                std::env::remove_var(var);
            }
            for (name, value) in vars {
                std::env::set_var(name, value);
            }
        }
        let argv = std::iter::once("fenceguard").chain(args.iter().copied());
        let parsed = RemoteCli::try_parse_from(argv).unwrap();
        unsafe {
            for var in REMOTE_VARS {
                std::env::remove_var(var);
            }
        }
        EnvConfig::from_inputs(parsed.remote.into())
    }

    #[test]
    #[serial]
    fn test_inputs_read_from_environment() {
        let config = resolve(
            &[
                (ENV_TOKEN, "abc"),
                (ENV_REPOSITORY, "octo/widgets"),
                (ENV_EVENT_PATH, "/github/workflow/event.json"),
                (ENV_ACTOR, "alice"),
                (ENV_API_URL, "https://ghe.example.com/api/v3"),
            ],
            &[],
        )
        .unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.repo, RepoId::new("octo", "widgets"));
        assert_eq!(config.event_path.to_str(), Some("/github/workflow/event.json"));
        assert_eq!(config.actor.as_deref(), Some("alice"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    #[serial]
    fn test_empty_actor_and_missing_api_url() {
        let config = resolve(
            &[
                (ENV_TOKEN, "abc"),
                (ENV_REPOSITORY, "octo/widgets"),
                (ENV_EVENT_PATH, "/tmp/event.json"),
                (ENV_ACTOR, ""),
            ],
            &[],
        )
        .unwrap();

        assert_eq!(config.actor, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        let config = resolve(
            &[
                (ENV_TOKEN, "from-env"),
                (ENV_REPOSITORY, "octo/widgets"),
                (ENV_EVENT_PATH, "/tmp/event.json"),
            ],
            &["--token", "from-flag", "--repository", "other/place"],
        )
        .unwrap();

        assert_eq!(config.token, "from-flag");
        assert_eq!(config.repo, RepoId::new("other", "place"));
    }

    #[test]
    #[serial]
    fn test_missing_event_path_is_named() {
        let err =
            resolve(&[(ENV_TOKEN, "abc"), (ENV_REPOSITORY, "octo/widgets")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_EVENT_PATH)));
    }
}
