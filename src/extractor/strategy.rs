//! Extraction strategies.
//!
//! Each strategy is one self-contained attempt at finding the latest
//! message. The engine runs them strictly in order and keeps the first
//! answer, so a strategy only has to say "here is the text" or "not me".

use async_trait::async_trait;

use super::cascade::extract_from_containers;
use super::fallback::generic_search;
use super::waiter::wait_for_any;
use crate::page::Page;
use crate::selector::SelectorSet;
use crate::Options;

/// Shared, read-only inputs of every strategy.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Thresholds and wait budgets.
    pub options: &'a Options,
    /// Compiled container selectors.
    pub containers: &'a SelectorSet,
    /// Compiled text selectors.
    pub texts: &'a SelectorSet,
}

/// One attempt at extracting the latest message.
#[async_trait(?Send)]
pub trait Strategy {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Try to extract the message; `None` hands over to the next strategy.
    async fn attempt(&self, page: &Page, ctx: &Context<'_>) -> Option<String>;
}

/// Wait for known containers, then scan them newest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorCascade;

#[async_trait(?Send)]
impl Strategy for SelectorCascade {
    fn name(&self) -> &'static str {
        "selector-cascade"
    }

    async fn attempt(&self, page: &Page, ctx: &Context<'_>) -> Option<String> {
        let matches = wait_for_any(page, ctx.containers, ctx.options.container_wait()).await?;
        extract_from_containers(&matches, ctx.texts, ctx.options)
    }
}

/// Let rendering settle, then search conversation-shaped markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSearch;

#[async_trait(?Send)]
impl Strategy for GenericSearch {
    fn name(&self) -> &'static str {
        "generic-search"
    }

    async fn attempt(&self, page: &Page, ctx: &Context<'_>) -> Option<String> {
        tokio::time::sleep(ctx.options.fallback_grace()).await;
        let doc = page.snapshot();
        generic_search(&doc, ctx.options)
    }
}

/// Strategies in priority order: exact selectors before heuristics.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![Box::new(SelectorCascade), Box::new(GenericSearch)]
}
