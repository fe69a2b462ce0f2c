//! Text cleaning for rendered message blocks.
//!
//! The rendered text of a conversation turn mixes the message with its
//! chrome: sender name, timestamps, "Like"/"Reply" buttons, read receipts.
//! `clean_message_text` keeps only the lines that carry the message.

use crate::patterns::{NON_WORD_LINE, UI_LABEL_LINE};
use crate::Options;

/// Extract the substantive message from a raw multi-line text blob.
///
/// Lines shorter than `min_line_len`, whole-line UI labels and lines
/// without words are dropped. When several surviving lines are
/// substantial (longer than `substantial_line_len`) they are joined with a
/// space, which reassembles messages that wrapped across rendered lines.
/// Otherwise the longest substantial line wins, or the first surviving
/// line when none is substantial.
///
/// Returns `None` when no line survives.
///
/// ```rust
/// use rs_lastmessage::cleaning::clean_message_text;
/// use rs_lastmessage::Options;
///
/// let raw = "Jane Doe\n10:42 AM\nThanks for reaching out about the role!\nLike\nReply";
/// let cleaned = clean_message_text(raw, &Options::default());
/// assert_eq!(cleaned.as_deref(), Some("Thanks for reaching out about the role!"));
/// ```
#[must_use]
pub fn clean_message_text(raw: &str, options: &Options) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| is_content_line(line, options))
        .collect();

    let first = *lines.first()?;

    let substantial: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.chars().count() > options.substantial_line_len)
        .collect();

    if substantial.len() > 1 {
        return Some(substantial.join(" "));
    }

    Some(substantial.first().copied().unwrap_or(first).to_string())
}

/// Whether a trimmed line can be part of a message.
fn is_content_line(line: &str, options: &Options) -> bool {
    if line.chars().count() < options.min_line_len {
        return false;
    }
    if UI_LABEL_LINE.is_match(line) {
        return false;
    }
    !NON_WORD_LINE.is_match(line)
}
