/*!
 * Per-line normalization of WebVTT caption text.
 *
 * Each line is classified structurally: anything containing the cue arrow is a
 * timestamp line, everything else is caption text. Timestamp lines lose their
 * trailing cue settings and get SRT's comma separators; caption lines lose
 * their inline markup. Blank separator lines are dropped.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use log::trace;

use crate::app_config::{Config, MarkupMode};

/// Separator between the start and end clock of a cue
pub const ARROW: &str = " --> ";

/// Characters kept from the start of the arrow: the arrow plus one
/// `HH:MM:SS.mmm` clock. Assumes the fixed-width clocks of auto-generated
/// captions; anything past this width is cue settings.
pub const TIMESTAMP_LEN: usize = 17;

// @const: A tag that closes on the same line
static CLOSED_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^<>]*>").expect("closed tag regex is valid")
});

/// Structural kind of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Carries a `start --> end` time range
    Timestamp,
    /// Caption text shown during a time range
    Caption,
}

/// Classify a line by the presence of the cue arrow
pub fn line_kind(line: &str) -> LineKind {
    if line.contains(ARROW) {
        LineKind::Timestamp
    } else {
        LineKind::Caption
    }
}

/// Whether the line is a timestamp line
pub fn is_timestamp(line: &str) -> bool {
    line_kind(line) == LineKind::Timestamp
}

/// Cut a timestamp line `width` characters after the start of the arrow.
///
/// Lines without an arrow, or too short to reach the cut, come back whole.
pub fn truncate_timestamp(line: &str, width: usize) -> &str {
    let Some(arrow_pos) = line.find(ARROW) else {
        return line;
    };

    match line[arrow_pos..].char_indices().nth(width) {
        Some((offset, _)) => &line[..arrow_pos + offset],
        None => line,
    }
}

/// Replace VTT decimal points with SRT commas
pub fn fix_separators(line: &str) -> String {
    line.replace('.', ",")
}

/// Remove inline markup from a caption line
pub fn strip_markup(line: &str, mode: MarkupMode) -> String {
    match mode {
        MarkupMode::Lenient => strip_markup_lenient(line),
        MarkupMode::Strict => CLOSED_TAG_REGEX.replace_all(line, "").into_owned(),
    }
}

// A `<` starts erasing and only a `>` stops it, so an unclosed `<` eats the
// rest of the line. Delimiters themselves are never kept.
fn strip_markup_lenient(line: &str) -> String {
    let mut stripped = String::with_capacity(line.len());
    let mut erase = false;

    for c in line.chars() {
        match c {
            '<' => erase = true,
            '>' => erase = false,
            _ if !erase => stripped.push(c),
            _ => {}
        }
    }

    stripped
}

/// Line normalizer configured with a markup mode and timestamp width
#[derive(Debug, Clone)]
pub struct Normalizer {
    markup_mode: MarkupMode,
    timestamp_width: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            markup_mode: MarkupMode::Lenient,
            timestamp_width: TIMESTAMP_LEN,
        }
    }
}

impl Normalizer {
    /// Create a normalizer with explicit settings
    pub fn new(markup_mode: MarkupMode, timestamp_width: usize) -> Self {
        Self { markup_mode, timestamp_width }
    }

    /// Create a normalizer from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.markup_mode, config.timestamp_width)
    }

    /// Normalize a single line, returning `None` when it should be dropped
    pub fn normalize_line(&self, line: &str) -> Option<String> {
        if line.chars().count() <= 1 {
            return None;
        }

        match line_kind(line) {
            LineKind::Timestamp => {
                Some(fix_separators(truncate_timestamp(line, self.timestamp_width)))
            }
            LineKind::Caption => {
                let text = strip_markup(line, self.markup_mode);
                if text.is_empty() {
                    trace!("Dropping caption left empty by markup stripping: {:?}", line);
                    None
                } else {
                    Some(text)
                }
            }
        }
    }

    /// Normalize every line, keeping the survivors in order
    pub fn normalize(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| self.normalize_line(line))
            .collect()
    }
}
