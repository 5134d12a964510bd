//! Configuration for Taskboard clients.
//!
//! Supports layered configuration with the following priority (highest
//! first):
//! 1. Command-line arguments
//! 2. Environment variables (via clap `env` attributes)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that cannot be read is.

use crate::board::domain::{SortMode, TaskDomainError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Default collection server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default collection resource name.
pub const DEFAULT_COLLECTION: &str = "todos";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The remote base URL is not a valid URL.
    #[error("invalid base URL '{value}': {source}")]
    InvalidUrl {
        /// Rejected value.
        value: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// The sort mode is not recognised.
    #[error(transparent)]
    InvalidSortMode(#[from] TaskDomainError),
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    remote: RemoteFileConfig,
    board: BoardFileConfig,
    log: LogFileConfig,
}

/// `[remote]` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteFileConfig {
    base_url: Option<String>,
    collection: Option<String>,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    sort: Option<String>,
}

/// `[log]` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
}

/// Configuration flags shared by Taskboard binaries.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Base URL of the task collection server.
    #[arg(long = "url", env = "TASKBOARD_URL")]
    pub base_url: Option<String>,

    /// Name of the task collection resource.
    #[arg(long, env = "TASKBOARD_COLLECTION")]
    pub collection: Option<String>,

    /// Initial sort mode: default, ascending or descending.
    #[arg(long)]
    pub sort: Option<String>,

    /// Log filter, e.g. `info` or `taskboard=debug`.
    #[arg(long, env = "TASKBOARD_LOG")]
    pub log_level: Option<String>,

    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL of the task collection server.
    pub base_url: Url,
    /// Name of the task collection resource.
    pub collection: String,
    /// Initial sort mode.
    pub sort_mode: SortMode,
    /// Log filter directive.
    pub log_level: String,
}

impl BoardConfig {
    /// Loads configuration by merging arguments, environment and a TOML
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit config file cannot be read or
    /// parsed, or a resolved value is invalid.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(args.config.as_deref())?;
        Self::resolve(args, &file)
    }

    /// Resolves a configuration from arguments and a parsed file.
    ///
    /// Priority: arguments > file > defaults.
    fn resolve(args: &ConfigArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let base_url = args
            .base_url
            .clone()
            .or_else(|| file.remote.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let sort_mode = args
            .sort
            .as_deref()
            .or(file.board.sort.as_deref())
            .map(SortMode::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            base_url: Url::parse(&base_url).map_err(|source| ConfigError::InvalidUrl {
                value: base_url.clone(),
                source,
            })?,
            collection: args
                .collection
                .clone()
                .or_else(|| file.remote.collection.clone())
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_owned()),
            sort_mode,
            log_level: args
                .log_level
                .clone()
                .or_else(|| file.log.level.clone())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

/// Loads the config file from an explicit path or the default location.
fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => read_config_file(&path),
        _ => Ok(ConfigFile::default()),
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

/// Returns `~/.config/taskboard/config.toml`, if a config directory exists.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
}
