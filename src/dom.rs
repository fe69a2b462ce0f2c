//! DOM Operations Adapter
//!
//! Thin read-only helpers over the `dom_query` crate. The extraction engine
//! never mutates a document, so only queries, tree navigation and rendered
//! text live here.

pub use dom_query::{Document, NodeRef, Selection};

use crate::patterns::{HIDDEN_TAGS, INLINE_WHITESPACE, WHITESPACE_NORMALIZE};

/// Elements that start a new rendered line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attributes ===

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Lowercase tag name of a node, if it is an element.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Whether the node is an element whose content is never rendered.
#[must_use]
pub fn is_hidden(node: &NodeRef) -> bool {
    node_tag(node).is_some_and(|t| HIDDEN_TAGS.contains(&t.as_str()))
}

// === Tree Navigation ===

/// Number of ancestors between the node and the document root.
///
/// Counted by walking parents, which also covers text nodes.
#[must_use]
pub fn depth(node: &NodeRef) -> usize {
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        depth += 1;
        current = parent.parent();
    }
    depth
}

/// First `main` element, else `body`, else the whole document.
#[must_use]
pub fn content_root(doc: &Document) -> Selection<'_> {
    let main = doc.select("main").first();
    if main.exists() {
        return main;
    }
    let body = doc.select("body").first();
    if body.exists() {
        return body;
    }
    doc.select("html").first()
}

// === Rendered Text ===

/// Rendered text of the first node in a selection.
///
/// Approximates the browser's `innerText`: whitespace inside text nodes
/// collapses, block elements and `<br>` break lines, hidden elements are
/// skipped. Lines are trimmed and blank lines dropped.
#[must_use]
pub fn inner_text(sel: &Selection) -> String {
    sel.nodes().first().map(node_inner_text).unwrap_or_default()
}

/// Rendered text of a single node (element or text node).
#[must_use]
pub fn node_inner_text(node: &NodeRef) -> String {
    let mut raw = String::new();
    if node.is_text() {
        raw.push_str(&WHITESPACE_NORMALIZE.replace_all(&node.text(), " "));
    } else if !is_hidden(node) {
        collect_rendered(node, &mut raw);
    }
    normalize_lines(&raw)
}

fn collect_rendered(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&WHITESPACE_NORMALIZE.replace_all(&child.text(), " "));
            continue;
        }
        let Some(tag) = node_tag(&child) else {
            continue;
        };
        if HIDDEN_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if tag == "br" {
            out.push('\n');
            continue;
        }

        let block = BLOCK_TAGS.contains(&tag.as_str());
        if block {
            out.push('\n');
        }
        collect_rendered(&child, out);
        if block {
            out.push('\n');
        }
    }
}

/// Collapse horizontal whitespace, trim each line and drop blank lines.
#[must_use]
pub fn normalize_lines(raw: &str) -> String {
    let collapsed = INLINE_WHITESPACE.replace_all(raw, " ");
    collapsed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
