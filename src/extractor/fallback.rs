//! Generic Fallback Search
//!
//! Runs when none of the cascade selectors locate a message, which usually
//! means the page markup has drifted from the known class names. Instead of
//! exact selectors it looks for loosely conversation-shaped elements in the
//! main region and ranks every plausible element inside them.
//!
//! The ranking is an empirically tuned heuristic: deeper text is preferred
//! (inner content rather than wrappers), and among text at about the same
//! depth the one later in the document wins (closer to the newest turn).

use std::collections::HashSet;

use dom_query::{Document, NodeId, NodeRef};
use tracing::{debug, trace};

use super::cascade::preview;
use crate::cleaning::clean_message_text;
use crate::dom;
use crate::patterns::CANDIDATE_TAGS;
use crate::selector::conversation::is_conversation_item;
use crate::selector::query_all;
use crate::selector::ui_metadata::{is_compose_placeholder, is_ui_metadata};
use crate::Options;

/// An element whose text might be the latest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCandidate {
    /// Rendered text of the element, line breaks kept.
    pub text: String,
    /// Number of ancestors up to the document root.
    pub depth: usize,
    /// Index in document order within the searched region.
    pub position: usize,
}

/// Ordering policy for fallback candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Depth differences strictly below this count as a tie.
    pub depth_tolerance: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self { depth_tolerance: 2 }
    }
}

impl From<&Options> for RankingPolicy {
    fn from(options: &Options) -> Self {
        Self {
            depth_tolerance: options.depth_tolerance,
        }
    }
}

impl RankingPolicy {
    /// Order candidates from most to least plausible.
    ///
    /// Repeatedly takes the deepest remaining depth, treats every remaining
    /// candidate within tolerance of it as tied, and emits the tied
    /// candidate with the latest position. Selecting one item at a time
    /// keeps the order well defined even though "within tolerance" is not
    /// transitive.
    #[must_use]
    pub fn rank(&self, candidates: Vec<TextCandidate>) -> Vec<TextCandidate> {
        let mut remaining = candidates;
        let mut ranked = Vec::with_capacity(remaining.len());

        while let Some(deepest) = remaining.iter().map(|c| c.depth).max() {
            let pick = remaining
                .iter()
                .enumerate()
                .filter(|(_, c)| deepest - c.depth < self.depth_tolerance)
                .max_by_key(|(_, c)| c.position)
                .map(|(i, _)| i);
            let Some(index) = pick else {
                break;
            };
            ranked.push(remaining.swap_remove(index));
        }

        ranked
    }
}

/// Collect plausible message elements inside conversation-shaped elements.
///
/// Candidates are `p`, `div`, `span` and `li` elements that are, or sit
/// inside, a conversation item. Each element is considered once, even under
/// nested items. Its rendered text keeps inline markup together and keeps
/// line breaks for the cleaner. Elements under hidden ancestors, outside the
/// length window, or classified as UI metadata are skipped.
#[must_use]
pub fn collect_candidates(doc: &Document, options: &Options) -> Vec<TextCandidate> {
    let root = dom::content_root(doc);
    let Some(root_node) = root.nodes().first().copied() else {
        return Vec::new();
    };

    let items: HashSet<NodeId> = query_all(&root, is_conversation_item)
        .iter()
        .filter_map(|sel| sel.nodes().first().map(|n| n.id))
        .collect();
    if items.is_empty() {
        debug!("no conversation-shaped elements in content region");
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for (position, node) in root_node.descendants().into_iter().enumerate() {
        let is_candidate_tag = dom::node_tag(&node).is_some_and(|t| CANDIDATE_TAGS.contains(&t.as_str()));
        if !is_candidate_tag || !inside_item(&node, root_node.id, &items) {
            continue;
        }

        let text = dom::node_inner_text(&node);
        let len = text.chars().count();
        if len <= options.candidate_min_len || len >= options.candidate_max_len {
            continue;
        }
        if is_ui_metadata(&text, options) {
            continue;
        }

        let depth = dom::depth(&node);
        trace!(depth, position, preview = %preview(&text), "fallback candidate");
        candidates.push(TextCandidate { text, depth, position });
    }

    candidates
}

/// Whether a node is, or sits under, a conversation item and under no
/// hidden element.
fn inside_item(node: &NodeRef, root: NodeId, items: &HashSet<NodeId>) -> bool {
    let mut found = items.contains(&node.id);
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if dom::is_hidden(&ancestor) {
            return false;
        }
        if items.contains(&ancestor.id) {
            found = true;
        }
        if ancestor.id == root {
            break;
        }
        current = ancestor.parent();
    }
    found
}

/// Best-effort message from the document when no selector matched.
///
/// Walks the ranked candidates and returns the cleaned text of the first one
/// that survives cleaning with enough length and is not a compose-box
/// placeholder.
#[must_use]
pub fn generic_search(doc: &Document, options: &Options) -> Option<String> {
    let candidates = collect_candidates(doc, options);
    let total = candidates.len();
    let ranked = RankingPolicy::from(options).rank(candidates);

    let found = ranked.into_iter().find_map(|candidate| {
        let cleaned = clean_message_text(&candidate.text, options)?;
        let usable = cleaned.chars().count() > options.min_message_len && !is_compose_placeholder(&cleaned);
        usable.then_some(cleaned)
    });

    match &found {
        Some(text) => debug!(candidates = total, preview = %preview(text), "message from generic search"),
        None => debug!(candidates = total, "generic search found nothing"),
    }
    found
}
