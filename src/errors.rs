/*!
 * Error types for the vttsrt application.
 *
 * This module contains custom error types for the conversion pipeline and the
 * application glue around it, using the thiserror crate for ergonomic error
 * definitions.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a caption file
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input file does not exist
    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    /// The input file exists but could not be read completely
    #[error("Error reading file {}: {source}", .path.display())]
    ReadError {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A buffer for the input could not be reserved
    #[error("Memory allocation error: {0}")]
    AllocationFailure(String),

    /// The output file could not be created (recoverable)
    #[error("File creating error for {}: {source}", .path.display())]
    OutputOpenFailure {
        /// Output path that could not be opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A resolved filename was empty
    #[error("Empty filename")]
    EmptyFilename,

    /// Reading an answer from the interactive prompt failed
    #[error("Error reading filename from prompt: {0}")]
    PromptFailed(#[source] io::Error),

    /// The output sink failed while writing blocks
    #[error("Error writing subtitles: {0}")]
    WriteError(#[source] io::Error),
}

impl ConversionError {
    /// Whether the run may continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutputOpenFailure { .. })
    }
}

/// Errors raised while loading or validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid JSON for `Config`
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A config value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the conversion pipeline
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}
