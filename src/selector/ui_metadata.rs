//! UI chrome classification.
//!
//! Messages are surrounded by short labels: action buttons, relative
//! timestamps, read receipts. These predicates tell such chrome apart from
//! message content. Both lean towards keeping text: a label that slips
//! through costs less than a dropped short message.

use crate::patterns::{COMPOSE_PLACEHOLDER, UI_VOCABULARY};
use crate::Options;

/// Whether `text` is most likely UI chrome rather than a message.
///
/// Only short text (fewer than `ui_metadata_max_len` characters) containing
/// a vocabulary term, case-insensitively, qualifies. Longer text is never
/// chrome even when it mentions "like" or "reply".
///
/// ```rust
/// use rs_lastmessage::selector::ui_metadata::is_ui_metadata;
/// use rs_lastmessage::Options;
///
/// let options = Options::default();
/// assert!(is_ui_metadata("Like · Reply", &options));
/// assert!(!is_ui_metadata("I would like to hear more about the role", &options));
/// ```
#[must_use]
pub fn is_ui_metadata(text: &str, options: &Options) -> bool {
    if text.chars().count() >= options.ui_metadata_max_len {
        return false;
    }
    let lower = text.to_lowercase();
    UI_VOCABULARY.iter().any(|term| lower.contains(term))
}

/// Whether `text` is the placeholder of an empty compose box.
#[must_use]
pub fn is_compose_placeholder(text: &str) -> bool {
    COMPOSE_PLACEHOLDER.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_with_vocabulary_is_metadata() {
        let options = Options::default();
        assert!(is_ui_metadata("Like", &options));
        assert!(is_ui_metadata("Seen · 5 min ago", &options));
        assert!(is_ui_metadata("YESTERDAY", &options));
    }

    #[test]
    fn long_text_is_never_metadata() {
        let options = Options::default();
        let sentence = "I really like the plan you sent over here";
        assert_eq!(sentence.chars().count(), 41);
        assert!(!is_ui_metadata(sentence, &options));
    }

    #[test]
    fn short_text_without_vocabulary_is_kept() {
        assert!(!is_ui_metadata("Sounds great!", &Options::default()));
    }

    #[test]
    fn threshold_is_configurable() {
        let options = Options {
            ui_metadata_max_len: 50,
            ..Options::default()
        };
        assert!(is_ui_metadata("I really like the plan you sent over here", &options));
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_compose_placeholder("Type a message..."));
        assert!(is_compose_placeholder("Write a message…"));
        assert!(!is_compose_placeholder("Sounds good, talk soon."));
    }
}
