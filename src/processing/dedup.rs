/*!
 * Rolling-caption deduplication.
 *
 * Auto-generated captions echo each spoken line across consecutive cues: once
 * when it appears and again while the next line scrolls in. Two passes undo
 * this, and they only work in this order:
 * 1. `collapse_repeated_captions` drops caption text identical to the last kept caption
 * 2. `collapse_orphan_timestamps` drops timestamps the first pass left without a caption
 *
 * Only exact repeats collapse; a caption that shares just a prefix or suffix
 * with the previous one is kept.
 */

use log::{debug, trace};

use super::normalizer::is_timestamp;

/// Drop caption lines that repeat the last kept caption text.
///
/// Lines before the first timestamp (the `WEBVTT` header and its metadata) are
/// discarded; without any timestamp the result is empty. Timestamp lines are
/// always kept and never compared.
pub fn collapse_repeated_captions(lines: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(lines.len());
    let mut last_caption: Option<usize> = None;

    for line in lines.into_iter().skip_while(|line| !is_timestamp(line)) {
        if is_timestamp(&line) {
            kept.push(line);
            continue;
        }

        if last_caption.is_some_and(|idx| kept[idx] == line) {
            trace!("Dropping repeated caption: {:?}", line);
            continue;
        }

        last_caption = Some(kept.len());
        kept.push(line);
    }

    kept
}

/// Drop timestamp lines that are not immediately followed by a caption line.
///
/// Of two adjacent timestamps the first goes; a timestamp ending the document
/// goes too. Caption lines are always kept.
pub fn collapse_orphan_timestamps(lines: Vec<String>) -> Vec<String> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        if is_timestamp(&line) && !iter.peek().is_some_and(|next| !is_timestamp(next)) {
            trace!("Dropping orphan timestamp: {:?}", line);
            continue;
        }
        kept.push(line);
    }

    kept
}

/// Run both deduplication passes in order
pub fn deduplicate(lines: Vec<String>) -> Vec<String> {
    let before = lines.len();
    let captions_collapsed = collapse_repeated_captions(lines);
    let after_captions = captions_collapsed.len();
    let result = collapse_orphan_timestamps(captions_collapsed);

    debug!(
        "Deduplication: {} lines -> {} after caption collapse -> {} after timestamp collapse",
        before, after_captions, result.len()
    );

    result
}
