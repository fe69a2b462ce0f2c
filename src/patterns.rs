//! Compiled regex patterns and selector lists for message extraction.
//!
//! All patterns are compiled once on first use with `LazyLock`.
//! Selector lists are ordered: earlier entries are more specific and are
//! tried first.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Selector Cascade
// =============================================================================

/// Selectors for elements that represent one conversation turn.
///
/// LinkedIn's own class names come first, then attribute-based hooks, then
/// loose substring matches and landmark-scoped list items.
pub const CONTAINER_SELECTORS: &[&str] = &[
    ".msg-s-message-list__event",
    ".msg-s-event-listitem",
    ".msg-s-message-group",
    ".msg-s-message-listitem",
    r#"[data-test-id="message-item"]"#,
    r#"[data-testid="message-item"]"#,
    ".conversation-item",
    r#"li[class*="message"]"#,
    r#"div[class*="message"]"#,
    r#"div[class*="Message"]"#,
    ".msg-s-message-listcontainer .msg-s-event-listitem",
    r#"[class*="event-listitem"]"#,
    r#"[class*="message-list"] li"#,
    r#"[class*="MessageGroup"]"#,
    "main li",
    r#"main [role="listitem"]"#,
];

/// Selectors for the element holding a message body inside a container.
pub const TEXT_SELECTORS: &[&str] = &[
    ".msg-s-event-listitem__body",
    ".msg-s-event-listitem__message-bubble",
    ".msg-s-message-group__message-bubble",
    ".msg-s-message-listitem__body",
    r#"[data-test-id="message-text"]"#,
    r#"[data-testid="message-text"]"#,
    ".message-body",
    r#"p[dir="ltr"]"#,
    r#"p[dir="rtl"]"#,
    r#"div[class*="message-bubble"]"#,
    r#"div[class*="message-body"]"#,
    r#"span[class*="message"]"#,
    ".text",
    "p",
];

// =============================================================================
// UI Chrome Detection
// =============================================================================

/// Short action and status words rendered around messages.
///
/// Matched as case-insensitive substrings by the UI-metadata filter.
pub const UI_VOCABULARY: &[&str] = &[
    "like", "reply", "more", "share", "send", "copy", "edit", "delete", "today",
    "yesterday", "just now", "min ago", "hour ago", "viewed",
];

/// Whole-line UI labels dropped by the text cleaner.
pub static UI_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:like|reply|more|share|send|copy|edit|delete|today|yesterday|just now|\d+ (?:min|hour|day)s? ago|viewed|seen|delivered|\d{1,2}:\d{2} (?:am|pm)|you:|me:)$",
    )
    .expect("UI_LABEL_LINE regex")
});

/// Lines that carry no words: digits, whitespace and punctuation only.
pub static NON_WORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d\s\p{P}]+$").expect("NON_WORD_LINE regex")
});

/// Placeholder phrases of an empty compose box.
pub static COMPOSE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(type a message|write a message|start a new message|write a reply)")
        .expect("COMPOSE_PLACEHOLDER regex")
});

// =============================================================================
// Generic Search
// =============================================================================

/// Class-name fragments suggesting a conversation item.
pub static CONVERSATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(message|conversation|thread|event)").expect("CONVERSATION_CLASS regex")
});

/// Tags eligible as conversation items in the generic search.
pub const CONVERSATION_TAGS: &[&str] = &["div", "li", "section", "article", "ul", "ol"];

/// Elements whose rendered text can be a generic-search candidate.
pub const CANDIDATE_TAGS: &[&str] = &["p", "div", "span", "li"];

/// Tags whose text is never rendered.
pub const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

// =============================================================================
// Text Normalization
// =============================================================================

/// Matches any whitespace run, newlines included.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Matches runs of horizontal whitespace for normalization.
pub static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("INLINE_WHITESPACE regex"));

// =============================================================================
// Reply Parsing
// =============================================================================

/// Line, bullet and leading-number separators between suggested replies.
pub static REPLY_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\n+|•|[-*]\s+|^\d+[.)]\s+").expect("REPLY_SEPARATOR regex")
});

/// A bare heading line such as "Reply 2:" or "Here are".
pub static REPLY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:suggestion|reply|option|here are|here's)\s*\d*:?$").expect("REPLY_HEADING regex")
});

/// Short lead-in phrases wrapped around the actual suggestions.
pub static REPLY_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:please|thank|here|below)").expect("REPLY_LEAD_IN regex")
});

/// A run of text ending in sentence punctuation.
pub static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("SENTENCE regex"));

/// Suggestion label at the start of a sentence.
pub static REPLY_LABEL_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:suggestion|reply|option)").expect("REPLY_LABEL_START regex")
});

/// Number markers such as "1." or "2)" anywhere in the text.
pub static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.)]\s+").expect("NUMBER_MARKER regex"));

/// Blank-line paragraph breaks.
pub static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("PARAGRAPH_BREAK regex"));

/// Prefixes stripped from each reply: numbering, labels and bullets.
pub static REPLY_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("REPLY_NUMBER_PREFIX regex"));

/// "Reply 1:" style label prefix.
pub static REPLY_LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:reply|suggestion|option)\s*\d*:?\s*").expect("REPLY_LABEL_PREFIX regex")
});

/// Leading bullet character.
pub static REPLY_BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s*").expect("REPLY_BULLET_PREFIX regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_label_line_matches_chrome() {
        assert!(UI_LABEL_LINE.is_match("Reply"));
        assert!(UI_LABEL_LINE.is_match("3 hours ago"));
        assert!(UI_LABEL_LINE.is_match("10:42 AM"));
        assert!(UI_LABEL_LINE.is_match("You:"));
        assert!(!UI_LABEL_LINE.is_match("Reply when you can"));
    }

    #[test]
    fn non_word_line_matches_only_wordless_lines() {
        assert!(NON_WORD_LINE.is_match("12 : 30"));
        assert!(NON_WORD_LINE.is_match("...!!"));
        assert!(!NON_WORD_LINE.is_match("ok 123"));
        assert!(!NON_WORD_LINE.is_match("🎉🎉🎉"));
    }

    #[test]
    fn compose_placeholder_is_case_insensitive() {
        assert!(COMPOSE_PLACEHOLDER.is_match("Type a message..."));
        assert!(COMPOSE_PLACEHOLDER.is_match("WRITE A MESSAGE"));
        assert!(!COMPOSE_PLACEHOLDER.is_match("I typed the message already"));
    }

    #[test]
    fn conversation_class_matches_loose_names() {
        assert!(CONVERSATION_CLASS.is_match("message-bubble"));
        assert!(CONVERSATION_CLASS.is_match("ThreadView"));
        assert!(!CONVERSATION_CLASS.is_match("sidebar"));
    }

    #[test]
    fn whitespace_normalize_collapses_newlines() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello \n   world", " ");
        assert_eq!(result, "hello world");
    }

    #[test]
    fn inline_whitespace_keeps_newlines() {
        let result = INLINE_WHITESPACE.replace_all("a \t b\n c", " ");
        assert_eq!(result, "a b\n c");
    }
}
