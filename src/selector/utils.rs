//! Utility functions for selector rules
//!
//! Attribute and tag helpers that return empty strings instead of options,
//! which keeps predicate rules short.

use crate::dom;
use dom_query::Selection;

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Check if element is one of the specified tags
///
/// # Example
///
/// ```rust
/// use rs_lastmessage::selector::utils;
/// use rs_lastmessage::dom;
///
/// let doc = dom::parse("<li>content</li>");
/// let item = doc.select("li");
///
/// assert!(utils::is_one_of_tags(&item, &["li", "div"]));
/// assert!(!utils::is_one_of_tags(&item, &["p", "span"]));
/// ```
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}
