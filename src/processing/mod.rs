/*!
 * Caption processing passes for WebVTT to SRT conversion.
 *
 * A document flows through these stages, strictly in order:
 * 1. **Splitter**: raw text into lines
 * 2. **Normalizer**: blank-line removal, timestamp truncation and separator fix, markup stripping
 * 3. **Dedup**: repeated-caption collapse, then orphan-timestamp collapse
 *
 * Serialization to SRT blocks lives in `subtitle_processor`.
 */

pub mod dedup;
pub mod normalizer;
pub mod splitter;

pub use dedup::{collapse_orphan_timestamps, collapse_repeated_captions, deduplicate};
pub use normalizer::{LineKind, Normalizer, is_timestamp, line_kind};
pub use splitter::split_lines;
