use anyhow::{Result, Context};
use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use log::debug;

use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::processing::splitter::decode_bytes;

// @module: File, filename and prompt utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Read a whole caption file into memory as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, ConversionError> {
        let path = path.as_ref();
        let read_error = |source: io::Error| ConversionError::ReadError {
            path: path.to_path_buf(),
            source,
        };

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConversionError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(read_error(e)),
        };

        let expected = file.metadata().map_err(read_error)?.len();
        let capacity = usize::try_from(expected)
            .map_err(|_| ConversionError::AllocationFailure(format!("{} bytes do not fit in memory", expected)))?;

        let mut buffer: Vec<u8> = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|e| ConversionError::AllocationFailure(e.to_string()))?;

        let read = file.read_to_end(&mut buffer).map_err(read_error)?;
        if (read as u64) < expected {
            return Err(read_error(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read {} of {} bytes", read, expected),
            )));
        }

        debug!("Read {} bytes from {:?}", read, path);
        Ok(decode_bytes(buffer))
    }

    /// Create (or truncate) an output file for writing
    pub fn create_output<P: AsRef<Path>>(path: P) -> Result<File, ConversionError> {
        let path = path.as_ref();
        File::create(path).map_err(|source| ConversionError::OutputOpenFailure {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Append `.extension` to a name that does not already end with it
    pub fn ensure_extension(name: &str, extension: &str) -> Result<String, ConversionError> {
        if name.is_empty() {
            return Err(ConversionError::EmptyFilename);
        }

        let suffix = format!(".{}", extension);
        if name.ends_with(&suffix) {
            Ok(name.to_string())
        } else {
            Ok(format!("{}{}", name, suffix))
        }
    }

    /// Derive the default output name by swapping the input extension.
    ///
    /// Names without the input extension get the output extension appended.
    pub fn derive_output_name(input_name: &str, input_extension: &str, output_extension: &str) -> String {
        let suffix = format!(".{}", input_extension);
        match input_name.strip_suffix(&suffix) {
            Some(stem) => format!("{}.{}", stem, output_extension),
            None => format!("{}.{}", input_name, output_extension),
        }
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Write a prompt and read one answer line, without its line ending
    pub fn prompt_line<R: BufRead, W: Write>(
        reader: &mut R,
        writer: &mut W,
        prompt: &str,
    ) -> Result<String, ConversionError> {
        write!(writer, "{}", prompt).map_err(ConversionError::PromptFailed)?;
        writer.flush().map_err(ConversionError::PromptFailed)?;

        let mut answer = String::new();
        let read = reader.read_line(&mut answer).map_err(ConversionError::PromptFailed)?;
        if read == 0 {
            return Err(ConversionError::PromptFailed(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a filename was entered",
            )));
        }

        Ok(answer.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Rules for turning arguments and prompt answers into filenames
#[derive(Debug, Clone)]
pub struct FilenamePolicy {
    /// Extension for input names, without the dot
    pub input_extension: String,
    /// Extension for output names, without the dot
    pub output_extension: String,
    /// Ask on the prompt when a name is missing
    pub interactive: bool,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FilenamePolicy {
    /// Build the policy from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_extension: config.input_extension.clone(),
            output_extension: config.output_extension.clone(),
            interactive: config.interactive,
        }
    }

    /// Resolve the input filename from the argument or the prompt
    pub fn resolve_input<R: BufRead, W: Write>(
        &self,
        argument: Option<&str>,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<String, ConversionError> {
        let name = match argument {
            Some(name) => name.to_string(),
            None if self.interactive => FileManager::prompt_line(
                reader,
                writer,
                &format!("Enter input filename (*.{}): ", self.input_extension),
            )?,
            None => return Err(ConversionError::EmptyFilename),
        };

        FileManager::ensure_extension(&name, &self.input_extension)
    }

    /// Default output filename for a resolved input filename
    pub fn default_output(&self, input_name: &str) -> String {
        FileManager::derive_output_name(input_name, &self.input_extension, &self.output_extension)
    }

    /// Resolve the output filename from the argument, the prompt, or the default.
    ///
    /// An empty argument or an empty prompt answer accepts the default.
    pub fn resolve_output<R: BufRead, W: Write>(
        &self,
        argument: Option<&str>,
        input_name: &str,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<String, ConversionError> {
        let default = self.default_output(input_name);

        let name = match argument {
            Some(name) => name.to_string(),
            None if self.interactive => FileManager::prompt_line(
                reader,
                writer,
                &format!("Enter output filename (default: {}): ", default),
            )?,
            None => String::new(),
        };

        if name.is_empty() {
            return Ok(default);
        }

        FileManager::ensure_extension(&name, &self.output_extension)
    }
}
