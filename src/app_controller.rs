use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::file_utils::{FileManager, FilenamePolicy};
use crate::subtitle_processor::{ProcessingStats, SubtitleDocument};

// @module: Application controller for caption conversion

/// Where the SRT output ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Written to the requested file
    File(PathBuf),
    /// Written to standard output because the file could not be created
    Stdout,
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Result of converting one caption file
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Input caption file
    pub input: PathBuf,
    /// Requested output path
    pub requested_output: PathBuf,
    /// Actual destination of the blocks
    pub output: OutputTarget,
    /// Line counts through the pipeline
    pub stats: ProcessingStats,
    /// Number of SRT blocks written
    pub blocks_written: usize,
}

/// Result of converting a directory of caption files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted successfully
    pub converted: usize,
    /// Files skipped because their output already exists
    pub skipped: usize,
    /// Files that failed to convert
    pub failed: usize,
}

/// Main application controller for caption conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Access the controller configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Filename rules derived from the configuration
    pub fn filename_policy(&self) -> FilenamePolicy {
        FilenamePolicy::from_config(&self.config)
    }

    /// Resolve input and output filenames from arguments, prompting for missing ones
    pub fn resolve_filenames<R: BufRead, W: Write>(
        &self,
        input_arg: Option<&str>,
        output_arg: Option<&str>,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(PathBuf, PathBuf), ConversionError> {
        let policy = self.filename_policy();
        let input = policy.resolve_input(input_arg, reader, writer)?;
        let output = policy.resolve_output(output_arg, &input, reader, writer)?;
        debug!("Resolved filenames: {} -> {}", input, output);
        Ok((PathBuf::from(input), PathBuf::from(output)))
    }

    /// Load a caption file and run the whole pipeline on it
    pub fn load_document(&self, input_file: &Path) -> Result<(SubtitleDocument, ProcessingStats), ConversionError> {
        let mut document = SubtitleDocument::from_file(input_file)?;
        let stats = document.process(&self.config);
        Ok((document, stats))
    }

    /// Convert one caption file, falling back to stdout if the output cannot be created
    pub fn convert_file(&self, input_file: &Path, output_file: &Path) -> Result<ConversionSummary, ConversionError> {
        let (document, stats) = self.load_document(input_file)?;

        let (output, blocks_written) = match FileManager::create_output(output_file) {
            Ok(mut file) => {
                let count = document.write_srt(&mut file).map_err(ConversionError::WriteError)?;
                (OutputTarget::File(output_file.to_path_buf()), count)
            }
            Err(e) if e.is_recoverable() => {
                warn!("{}. Sending the result to stdout.", e);
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                let count = document.write_srt(&mut handle).map_err(ConversionError::WriteError)?;
                (OutputTarget::Stdout, count)
            }
            Err(e) => return Err(e),
        };

        debug!(
            "{:?}: {} raw lines, {} normalized, {} after deduplication, {} blocks",
            input_file, stats.raw_lines, stats.normalized_lines, stats.deduplicated_lines, blocks_written
        );

        Ok(ConversionSummary {
            input: input_file.to_path_buf(),
            requested_output: output_file.to_path_buf(),
            output,
            stats,
            blocks_written,
        })
    }

    /// Convert every caption file under a directory next to its source
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<BatchSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Converting caption files in directory: {:?}", input_dir);

        let policy = self.filename_policy();
        let files = FileManager::find_files(input_dir, &policy.input_extension)
            .with_context(|| format!("Failed to scan directory: {:?}", input_dir))?;

        let mut summary = BatchSummary::default();

        for input_file in files {
            let input_name = input_file.to_string_lossy();
            let output_file = PathBuf::from(policy.default_output(&input_name));

            if output_file.exists() && !force_overwrite {
                warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
                summary.skipped += 1;
                continue;
            }

            match self.convert_file(&input_file, &output_file) {
                Ok(result) => {
                    info!("Subtitles exported to {} ({} blocks).", result.output, result.blocks_written);
                    summary.converted += 1;
                }
                Err(e) => {
                    error!("Error converting {:?}: {}", input_file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} converted, {} skipped, {} failed",
            summary.converted, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}
