use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;
use log::debug;

use crate::errors::ConfigError;
use crate::processing::normalizer::{ARROW, TIMESTAMP_LEN};

/// Application configuration module
/// This module handles loading and validating the converter settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// How inline caption markup is stripped
    #[serde(default)]
    pub markup_mode: MarkupMode,

    /// Characters kept from the start of the timestamp arrow
    #[serde(default = "default_timestamp_width")]
    pub timestamp_width: usize,

    /// Extension appended to input names that lack it
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Extension appended to output names that lack it
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Prompt for missing filenames on stdin
    #[serde(default = "default_interactive")]
    pub interactive: bool,
}

/// Markup stripping strategy for caption lines
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    // @mode: Erase from `<` to `>`, unclosed `<` erases the rest of the line
    #[default]
    Lenient,
    // @mode: Remove only `<...>` spans that close on the same line
    Strict,
}

impl std::fmt::Display for MarkupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for MarkupMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(anyhow::anyhow!("Invalid markup mode: {}", s)),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timestamp_width() -> usize {
    TIMESTAMP_LEN
}

fn default_input_extension() -> String {
    "vtt".to_string()
}

fn default_output_extension() -> String {
    "srt".to_string()
}

fn default_interactive() -> bool {
    true
}

impl Config {
    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestamp_width < ARROW.len() {
            return Err(ConfigError::Invalid(format!(
                "timestamp_width must be at least {}, got {}",
                ARROW.len(),
                self.timestamp_width
            )));
        }

        for (name, ext) in [("input_extension", &self.input_extension), ("output_extension", &self.output_extension)] {
            if ext.is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
            if ext.contains('.') {
                return Err(ConfigError::Invalid(format!("{} must not contain a dot: {}", name, ext)));
            }
        }

        if self.input_extension == self.output_extension {
            return Err(ConfigError::Invalid(format!(
                "input and output extensions must differ, both are '{}'",
                self.input_extension
            )));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            markup_mode: MarkupMode::default(),
            timestamp_width: default_timestamp_width(),
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
            interactive: default_interactive(),
        }
    }
}
