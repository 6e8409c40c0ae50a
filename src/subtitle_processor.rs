use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::debug;

use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::file_utils::FileManager;
use crate::processing::{Normalizer, deduplicate, is_timestamp, split_lines};

// @module: Caption document handling and SRT serialization

// @struct: Single SRT block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtEntry {
    // @field: Sequence number, starting at 1
    pub seq_num: usize,

    // @field: Timestamp line, `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    pub timestamp: String,

    // @field: Caption text
    pub text: String,
}

impl SrtEntry {
    /// Creates a new SRT entry
    pub fn new(seq_num: usize, timestamp: String, text: String) -> Self {
        SrtEntry {
            seq_num,
            timestamp,
            text,
        }
    }
}

impl fmt::Display for SrtEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", self.timestamp)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Line counts after each processing stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Lines produced by the splitter
    pub raw_lines: usize,
    /// Lines surviving normalization
    pub normalized_lines: usize,
    /// Lines surviving both deduplication passes
    pub deduplicated_lines: usize,
}

/// Caption document: an ordered sequence of lines being converted
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    /// Source filename
    pub source_file: PathBuf,

    /// Current lines, in source order
    pub lines: Vec<String>,
}

impl SubtitleDocument {
    /// Create a document from already split lines
    pub fn new(source_file: PathBuf, lines: Vec<String>) -> Self {
        SubtitleDocument { source_file, lines }
    }

    /// Create a document by splitting raw caption text
    pub fn from_content(source_file: PathBuf, content: &str) -> Self {
        Self::new(source_file, split_lines(content))
    }

    /// Load and split a caption file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let content = FileManager::read_document(path)?;
        Ok(Self::from_content(path.to_path_buf(), &content))
    }

    /// Apply the per-line normalizer
    pub fn normalize(&mut self, normalizer: &Normalizer) {
        let lines = std::mem::take(&mut self.lines);
        self.lines = normalizer.normalize(lines);
    }

    /// Apply both rolling-caption deduplication passes
    pub fn deduplicate(&mut self) {
        let lines = std::mem::take(&mut self.lines);
        self.lines = deduplicate(lines);
    }

    /// Run the full pipeline: normalize, then deduplicate
    pub fn process(&mut self, config: &Config) -> ProcessingStats {
        let raw_lines = self.lines.len();

        self.normalize(&Normalizer::from_config(config));
        let normalized_lines = self.lines.len();
        debug!("Normalized {} lines down to {}", raw_lines, normalized_lines);

        self.deduplicate();

        ProcessingStats {
            raw_lines,
            normalized_lines,
            deduplicated_lines: self.lines.len(),
        }
    }

    /// Pair each timestamp with the caption after it into numbered entries.
    ///
    /// A timestamp not followed by a non-empty caption line is dropped, as is any
    /// caption line that does not follow a timestamp.
    pub fn to_srt_entries(&self) -> Vec<SrtEntry> {
        let mut entries = Vec::new();
        let mut i = 0;

        while i < self.lines.len() {
            let line = &self.lines[i];
            if !is_timestamp(line) {
                i += 1;
                continue;
            }

            match self.lines.get(i + 1) {
                Some(text) if !text.is_empty() && !is_timestamp(text) => {
                    entries.push(SrtEntry::new(entries.len() + 1, line.clone(), text.clone()));
                    i += 2;
                }
                _ => {
                    debug!("Skipping timestamp without caption: {}", line);
                    i += 1;
                }
            }
        }

        entries
    }

    /// Write all SRT blocks to a sink, returning the number of blocks
    pub fn write_srt<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let entries = self.to_srt_entries();
        for entry in &entries {
            write!(writer, "{}", entry)?;
        }
        writer.flush()?;
        Ok(entries.len())
    }

    /// Render the document as an SRT string
    pub fn to_srt_string(&self) -> String {
        self.to_srt_entries()
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Lines: {}", self.lines.len())?;
        Ok(())
    }
}
