//! Loose structural rule for conversation items.
//!
//! Used by the generic search when none of the cascade selectors match the
//! current markup: any list/section-like element whose class mentions a
//! message, conversation, thread or event.

use dom_query::Selection;

use super::utils::{class, is_one_of_tags};
use crate::patterns::{CONVERSATION_CLASS, CONVERSATION_TAGS};

/// Whether the element looks like one item of a conversation.
#[must_use]
pub fn is_conversation_item(sel: &Selection) -> bool {
    if !is_one_of_tags(sel, CONVERSATION_TAGS) {
        return false;
    }
    CONVERSATION_CLASS.is_match(&class(sel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn matches_message_bubble_div() {
        let doc = dom::parse(r#"<div class="message-bubble">hi</div>"#);
        assert!(is_conversation_item(&doc.select("div")));
    }

    #[test]
    fn matches_thread_list_item() {
        let doc = dom::parse(r#"<ul><li class="ThreadItem">hi</li></ul>"#);
        assert!(is_conversation_item(&doc.select("li")));
    }

    #[test]
    fn requires_eligible_tag() {
        let doc = dom::parse(r#"<p class="message">hi</p>"#);
        assert!(!is_conversation_item(&doc.select("p")));
    }

    #[test]
    fn requires_keyword_class() {
        let doc = dom::parse(r#"<div class="profile-card">hi</div>"#);
        assert!(!is_conversation_item(&doc.select("div")));
    }
}
