//! Selector-cascade extraction.
//!
//! Given the containers located by the waiter, scan them newest first and
//! pull the message text out of the first one that yields any.

use dom_query::{NodeRef, Selection};
use tracing::debug;

use super::waiter::Matches;
use crate::cleaning::clean_message_text;
use crate::dom;
use crate::selector::ui_metadata::{is_compose_placeholder, is_ui_metadata};
use crate::selector::SelectorSet;
use crate::Options;

/// Text of the most recent container that yields an acceptable message.
///
/// Containers are visited in reverse document order: the thread renders
/// oldest first, so the last container is the newest turn. For each
/// container the text selectors are tried first, then the container's own
/// text, then its direct children from the last one back.
#[must_use]
pub fn extract_from_containers(
    matches: &Matches<'_>,
    texts: &SelectorSet,
    options: &Options,
) -> Option<String> {
    extract_from_selection(&matches.containers(), matches.selector(), texts, options)
}

/// Cascade over an already selected container list.
///
/// `selector` only labels log lines.
pub(crate) fn extract_from_selection(
    containers: &Selection,
    selector: &str,
    texts: &SelectorSet,
    options: &Options,
) -> Option<String> {
    for node in containers.nodes().iter().rev() {
        let container = Selection::from(node.clone());

        if let Some(text) = from_text_selectors(&container, texts, options) {
            debug!(selector, preview = %preview(&text), "message from text selector");
            return Some(text);
        }

        if let Some(text) = accept_cleaned(&dom::inner_text(&container), options) {
            debug!(selector, preview = %preview(&text), "message from container text");
            return Some(text);
        }

        if let Some(text) = from_children(node, options) {
            debug!(selector, preview = %preview(&text), "message from child node");
            return Some(text);
        }
    }

    None
}

fn from_text_selectors(container: &Selection, texts: &SelectorSet, options: &Options) -> Option<String> {
    texts
        .first_hits(container)
        .map(|hit| dom::inner_text(&hit))
        .find(|text| accept_direct(text, options))
}

fn from_children(container: &NodeRef, options: &Options) -> Option<String> {
    container
        .children()
        .iter()
        .rev()
        .find_map(|child| accept_cleaned(&dom::node_inner_text(child), options))
}

/// Gate for text taken as-is from a text-selector hit.
pub(crate) fn accept_direct(text: &str, options: &Options) -> bool {
    text.chars().count() > options.min_message_len
        && !is_ui_metadata(text, options)
        && !is_compose_placeholder(text)
}

/// Gate for mixed text: filter, clean, then re-check the cleaned result.
pub(crate) fn accept_cleaned(raw: &str, options: &Options) -> Option<String> {
    let raw = raw.trim();
    if raw.chars().count() <= options.min_message_len || is_ui_metadata(raw, options) {
        return None;
    }

    let cleaned = clean_message_text(raw, options)?;
    let usable = cleaned.chars().count() > options.min_message_len && !is_compose_placeholder(&cleaned);
    usable.then_some(cleaned)
}

/// First 50 characters, for log lines.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::waiter::check_now;
    use crate::page::Page;

    fn run(html: &str) -> Option<String> {
        let options = Options::default();
        let containers = SelectorSet::new(&options.container_selectors).unwrap();
        let texts = SelectorSet::new(&options.text_selectors).unwrap();
        let page = Page::new("https://www.linkedin.com/messaging/thread/1/", html);
        let matches = check_now(&page, &containers)?;
        extract_from_containers(&matches, &texts, &options)
    }

    #[test]
    fn newest_container_wins() {
        let html = r#"<ul>
            <li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">First message in the thread</p></li>
            <li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Second and newest message</p></li>
        </ul>"#;
        assert_eq!(run(html).as_deref(), Some("Second and newest message"));
    }

    #[test]
    fn skips_containers_without_text() {
        let html = r#"<ul>
            <li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">An earlier real message</p></li>
            <li class="msg-s-event-listitem"><span>Seen</span></li>
        </ul>"#;
        assert_eq!(run(html).as_deref(), Some("An earlier real message"));
    }

    #[test]
    fn text_selector_hit_rejects_chrome() {
        let html = r#"<div class="msg-s-message-group">
            <p class="msg-s-message-group__message-bubble">Like · Reply</p>
            <p dir="ltr">Let me check my calendar first</p>
        </div>"#;
        assert_eq!(run(html).as_deref(), Some("Let me check my calendar first"));
    }

    #[test]
    fn container_text_is_cleaned() {
        let html = r#"<div class="conversation-item">
            <span>Jordan Lee</span><br>
            <span>9:15 AM</span><br>
            <span>Are you free for a quick call on Thursday?</span><br>
            <span>Reply</span>
        </div>"#;
        assert_eq!(run(html).as_deref(), Some("Are you free for a quick call on Thursday?"));
    }

    #[test]
    fn placeholder_is_not_a_message() {
        let html = r#"<div class="msg-form__message-texteditor"><p>Type a message...</p></div>"#;
        assert_eq!(run(html), None);
    }

    #[test]
    fn accept_cleaned_requires_length_after_cleaning() {
        let options = Options::default();
        assert_eq!(accept_cleaned("Reply\nLike\nOk sure", &options), None);
        assert_eq!(
            accept_cleaned("Reply\nWorks for me, thanks for organising", &options).as_deref(),
            Some("Works for me, thanks for organising")
        );
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let text = "é".repeat(80);
        assert_eq!(preview(&text).chars().count(), 50);
    }
}
