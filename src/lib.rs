/*!
 * # vttsrt - WebVTT auto-caption to SRT converter
 *
 * A Rust library for turning auto-generated WebVTT captions into clean SRT
 * subtitles.
 *
 * ## Features
 *
 * - Strip inline caption markup (`<c>`, word timing tags)
 * - Rewrite timestamps to SRT's comma form, dropping cue settings
 * - Collapse rolling-caption repetition
 * - Number and serialize SRT blocks
 * - Resolve filenames from arguments or interactive prompts
 * - Convert a single file or a whole directory
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `processing`: The line pipeline:
 *   - `processing::splitter`: Raw text into lines
 *   - `processing::normalizer`: Markup and timestamp normalization
 *   - `processing::dedup`: Rolling-caption deduplication passes
 * - `subtitle_processor`: Caption documents and SRT serialization
 * - `file_utils`: File reading, filename resolution and prompts
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod processing;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel, MarkupMode};
pub use app_controller::{BatchSummary, ConversionSummary, Controller, OutputTarget};
pub use errors::{AppError, ConfigError, ConversionError};
pub use subtitle_processor::{ProcessingStats, SrtEntry, SubtitleDocument};
