//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "QSEARCH_CONFIG";

/// Environment variable overriding the deferred count delay in milliseconds.
pub const DELAY_ENV_VAR: &str = "QSEARCH_COUNT_DELAY_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value {value:?} for {var}")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/qsearch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Delay before a submitted count completes, in milliseconds.
    #[serde(default)]
    pub count_delay_ms: Option<u64>,

    /// Print results as JSON instead of plain text.
    #[serde(default)]
    pub json: Option<bool>,

    /// Prompt shown in interactive mode.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Deferred count delay in milliseconds.
    pub count_delay_ms: u64,
    /// JSON output.
    pub json: bool,
    /// Interactive prompt text.
    pub placeholder: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// The deferred count delay as a `Duration`.
    pub fn count_delay(&self) -> Duration {
        Duration::from_millis(self.count_delay_ms)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            count_delay_ms: 1000,
            json: false,
            placeholder: "Keywords separated by space".to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/qsearch/qsearch.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("qsearch").join("qsearch.log")
    } else {
        PathBuf::from("qsearch.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/qsearch/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qsearch").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `QSEARCH_CONFIG` environment variable
/// 3. Default path `~/.config/qsearch/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        let env_path = PathBuf::from(env_path);
        if env_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(env_path);
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        count_delay_ms: config.count_delay_ms.unwrap_or(defaults.count_delay_ms),
        json: config.json.unwrap_or(defaults.json),
        placeholder: config.placeholder.unwrap_or(defaults.placeholder),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `QSEARCH_COUNT_DELAY_MS`: Override the deferred count delay
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the delay is not a non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(DELAY_ENV_VAR) {
        config.count_delay_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: DELAY_ENV_VAR,
            value: raw.clone(),
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    delay_override: Option<u64>,
    json_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(delay) = delay_override {
        config.count_delay_ms = delay;
    }

    if let Some(json) = json_override {
        config.json = json;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
