use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ValidateError;
use crate::core::source::FileType;

/// Verbosity of the diagnostic log sink.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Settings for one validation run.
///
/// Every field is optional in a settings file. Values given on the command
/// line (or through `SENZING_TOOLS_*` variables) replace what the file says.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateConfig {
    /// Data source URL or path. Empty means standard input.
    #[serde(alias = "inputURL", alias = "input_url", alias = "input-url")]
    pub input_url: Option<String>,
    #[serde(alias = "file_type", alias = "file-type")]
    pub file_type: Option<FileType>,
    #[serde(alias = "log_level", alias = "log-level")]
    pub log_level: Option<LogLevel>,
}

impl ValidateConfig {
    /// Overlays values from the command line on top of these settings.
    pub fn merge(mut self, overrides: ValidateConfig) -> Self {
        if overrides.input_url.is_some() {
            self.input_url = overrides.input_url;
        }
        if overrides.file_type.is_some() {
            self.file_type = overrides.file_type;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        self
    }

    /// The locator to resolve; an absent value becomes the empty string
    /// that selects standard input.
    pub fn locator(&self) -> &str {
        self.input_url.as_deref().unwrap_or("")
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<ValidateConfig, ValidateError>;
    fn get_config_path(&self) -> Option<&Path>;
}

/// Loads settings from the file named with `--config`, if any.
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    fn config_error(&self, path: &Path, reason: impl ToString) -> ValidateError {
        ValidateError::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<ValidateConfig, ValidateError> {
        let Some(path) = &self.config_path else {
            return Ok(ValidateConfig::default());
        };

        let content = fs::read_to_string(path).map_err(|e| self.config_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| self.config_error(path, e))?
            }
            Some("toml") => toml::from_str(&content).map_err(|e| self.config_error(path, e))?,
            _ => {
                return Err(self.config_error(
                    path,
                    "unsupported settings format, expected .yaml, .yml or .toml",
                ));
            }
        };

        Ok(config)
    }

    fn get_config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
