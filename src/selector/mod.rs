//! Selector Infrastructure
//!
//! Two kinds of matching drive the extractor. Ordered CSS selector sets
//! (`SelectorSet`) express the cascade: earlier patterns are more specific
//! and win. Predicate rules (`Rule`) express the looser structural
//! heuristics the generic search relies on when the CSS patterns have gone
//! stale.

use std::fmt;

use dom_query::{Document, Matcher, Selection};

use crate::{Error, Result};

pub mod conversation;
pub mod ui_metadata;
pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// One compiled CSS pattern and its source text.
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    /// Compile a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSelector` if the selector does not parse.
    pub fn new(source: &str) -> Result<Self> {
        let matcher =
            Matcher::new(source).map_err(|_| Error::InvalidSelector(source.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            matcher,
        })
    }

    /// Selector source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All descendants of `root` matching this pattern, in document order.
    #[must_use]
    pub fn select_in<'a>(&self, root: &Selection<'a>) -> Selection<'a> {
        root.select_matcher(&self.matcher)
    }

    /// All elements of `doc` matching this pattern, in document order.
    #[must_use]
    pub fn select_all<'a>(&self, doc: &'a Document) -> Selection<'a> {
        Selection::from(doc.root()).select_matcher(&self.matcher)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// An ordered, immutable set of compiled selectors.
#[derive(Debug)]
pub struct SelectorSet {
    patterns: Vec<Pattern>,
}

impl SelectorSet {
    /// Compile every selector, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSelector` naming the first selector that fails
    /// to parse, or `Error::InvalidOptions` for an empty list.
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        if sources.is_empty() {
            return Err(Error::InvalidOptions("selector set is empty".into()));
        }
        let patterns = sources
            .iter()
            .map(|s| Pattern::new(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Patterns in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns. Never true for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern, in priority order, with any match in `doc`.
    #[must_use]
    pub fn first_matching(&self, doc: &Document) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.select_all(doc).exists())
    }

    /// The first element inside `root` matched by each pattern, in priority order.
    ///
    /// Patterns with no match inside `root` are skipped.
    pub fn first_hits<'a, 'b>(&'b self, root: &'b Selection<'a>) -> impl Iterator<Item = Selection<'a>> + 'b {
        self.patterns.iter().filter_map(move |p| {
            let hit = p.select_in(root).first();
            hit.exists().then_some(hit)
        })
    }
}

/// Query for all elements matching the rule
///
/// Iterates through all descendants in document order and collects all
/// elements for which the rule returns true.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(node.clone()))
        .filter(|sel| rule(sel))
        .collect()
}
