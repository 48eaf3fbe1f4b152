//!
//! This module defines the two configuration layers of fenceguard: the remote
//! inputs handed over by the CI environment (token, repository, event payload
//! path, actor), and the optional `.fenceguard.toml` settings file that tunes
//! scanning and comment matching.

use crate::autofix::DEFAULT_LANGUAGE;
use crate::github::{DEFAULT_API_URL, InvalidRepoId, RepoId};
use crate::reconcile::{BotIdentity, DEFAULT_BOT_LOGINS, DEFAULT_MARKER, DEFAULT_PAGE_SIZE};
use crate::scanner::DEFAULT_PREVIEW_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Settings file picked up from the working directory when no `--config` is given
pub const DEFAULT_SETTINGS_FILE: &str = ".fenceguard.toml";

pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const ENV_ACTOR: &str = "GITHUB_ACTOR";
pub const ENV_API_URL: &str = "GITHUB_API_URL";

const PAGE_SIZE: NonZeroU32 = NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap();
const PREVIEW_LENGTH: NonZeroU32 = NonZeroU32::new(DEFAULT_PREVIEW_LENGTH as u32).unwrap();

/// Errors that can occur when assembling configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required input was not provided (or was empty)
    #[error("Missing required input {0}")]
    Missing(&'static str),

    #[error(transparent)]
    InvalidRepository(#[from] InvalidRepoId),

    /// Failed to read the settings file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the settings file
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },

    /// Settings parsed but hold an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Global settings, all optional in the file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Language written into unlabelled fences by `fix`
    pub default_language: String,

    /// Comments fetched per page while looking for the status comment; zero
    /// is rejected while parsing
    pub page_size: NonZeroU32,

    /// Maximum characters of code shown per violation
    pub preview_length: NonZeroU32,

    /// Sentinel identifying the status comment
    pub marker: String,

    /// Logins always treated as the automation
    pub bot_logins: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            page_size: PAGE_SIZE,
            preview_length: PREVIEW_LENGTH,
            marker: DEFAULT_MARKER.to_string(),
            bot_logins: DEFAULT_BOT_LOGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Represents the complete configuration loaded from `.fenceguard.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub global: GlobalConfig,
}

impl Settings {
    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str, path: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let language = &self.global.default_language;
        if language.is_empty() || language.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "default-language must be a single non-empty word, got '{language}'"
            )));
        }
        if self.global.marker.trim().is_empty() {
            return Err(ConfigError::Invalid("marker must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bot_identity(&self, actor: Option<String>) -> BotIdentity {
        BotIdentity::new(self.global.bot_logins.clone(), actor)
    }
}

/// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] when present.
///
/// An explicitly requested file must exist; a missing default file just
/// yields the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    if !explicit && !path.exists() {
        log::debug!("no {DEFAULT_SETTINGS_FILE} found, using defaults");
        return Ok(Settings::default());
    }

    let display = path.display().to_string();
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::IoError {
        source,
        path: display.clone(),
    })?;
    log::info!("loaded settings from {display}");
    Settings::from_toml(&content, &display)
}

/// Remote inputs as handed over by the CLI (flags or environment)
#[derive(Debug, Clone, Default)]
pub struct RemoteInputs {
    pub token: Option<String>,
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
    pub actor: Option<String>,
    pub api_url: Option<String>,
}

/// Validated remote inputs
#[derive(Clone)]
pub struct EnvConfig {
    pub token: String,
    pub repo: RepoId,
    pub event_path: PathBuf,
    pub actor: Option<String>,
    pub api_url: String,
}

impl EnvConfig {
    pub fn from_inputs(inputs: RemoteInputs) -> Result<Self, ConfigError> {
        let token = non_empty(inputs.token).ok_or(ConfigError::Missing(ENV_TOKEN))?;
        let repository = non_empty(inputs.repository).ok_or(ConfigError::Missing(ENV_REPOSITORY))?;
        let event_path = inputs
            .event_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::Missing(ENV_EVENT_PATH))?;

        Ok(Self {
            token,
            repo: repository.parse()?,
            event_path,
            actor: non_empty(inputs.actor),
            api_url: non_empty(inputs.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("repo", &self.repo)
            .field("event_path", &self.event_path)
            .field("actor", &self.actor)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
