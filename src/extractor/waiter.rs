//! DOM-ready waiting.
//!
//! Message lists render asynchronously, so the container selectors may not
//! match when a request arrives. `wait_for_any` checks the current snapshot
//! first and otherwise re-checks after every batch of page changes until
//! the first match or the deadline.

use std::time::Duration;

use dom_query::Selection;
use tracing::debug;

use crate::dom::Document;
use crate::page::Page;
use crate::selector::{Pattern, SelectorSet};

/// Elements matched by the first selector of a set that matched anything.
///
/// Owns the snapshot the match was made against, so the selection stays
/// consistent even if the page re-renders afterwards.
pub struct Matches<'s> {
    document: Document,
    pattern: &'s Pattern,
}

impl<'s> Matches<'s> {
    /// The selector that produced the match.
    #[must_use]
    pub fn selector(&self) -> &'s str {
        self.pattern.source()
    }

    /// Matched elements in document order.
    #[must_use]
    pub fn containers(&self) -> Selection<'_> {
        self.pattern.select_all(&self.document)
    }

    /// Number of matched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers().length()
    }

    /// Always false: a `Matches` is only built from a non-empty match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the match was made against.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Check the page's current markup against the selectors, in priority order.
#[must_use]
pub fn check_now<'s>(page: &Page, selectors: &'s SelectorSet) -> Option<Matches<'s>> {
    let document = page.snapshot();
    let pattern = selectors.first_matching(&document)?;
    Some(Matches { document, pattern })
}

/// Resolve with the first selector's matches as soon as any selector
/// matches, or `None` once `timeout` elapses.
///
/// An already-rendered match resolves without registering an observer. The
/// observer registered otherwise is dropped before this function returns,
/// on every path.
pub async fn wait_for_any<'s>(
    page: &Page,
    selectors: &'s SelectorSet,
    timeout: Duration,
) -> Option<Matches<'s>> {
    if let Some(matches) = check_now(page, selectors) {
        debug!(selector = matches.selector(), "containers already present");
        return Some(matches);
    }

    let mut observer = page.observe();
    let watch = async {
        while observer.changed().await {
            if let Some(matches) = check_now(page, selectors) {
                return Some(matches);
            }
        }
        None
    };
    let outcome = tokio::time::timeout(timeout, watch).await.ok().flatten();
    drop(observer);

    match &outcome {
        Some(matches) => debug!(selector = matches.selector(), "containers rendered"),
        None => debug!(?timeout, "no container appeared"),
    }
    outcome
}
