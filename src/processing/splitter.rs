/*!
 * Line splitting for raw caption text.
 */

/// Split raw caption text into lines on `\n`.
///
/// The last line is kept even without a trailing line-feed, so empty input
/// yields a single empty line. A `\r` ending a line is trimmed.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Decode raw bytes as text, replacing invalid UTF-8 sequences
pub fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
