//! Extraction engine.
//!
//! Owns the compiled selector sets and the ordered strategy list. One call
//! produces exactly one result: the first strategy that answers wins and
//! nothing is merged.

use tracing::{debug, info};

use super::cascade::{extract_from_selection, preview};
use super::fallback::generic_search;
use super::strategy::{default_strategies, Context, Strategy};
use crate::dom::Document;
use crate::page::Page;
use crate::selector::SelectorSet;
use crate::{Options, Result};

/// The last-message extraction engine.
pub struct Engine {
    options: Options,
    containers: SelectorSet,
    texts: SelectorSet,
    strategies: Vec<Box<dyn Strategy>>,
}

impl Engine {
    /// Build an engine with the default strategy order.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` or `Error::InvalidSelector` when the
    /// options cannot be used.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_strategies(options, default_strategies())
    }

    /// Build an engine with a custom strategy order.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::new`].
    pub fn with_strategies(options: Options, strategies: Vec<Box<dyn Strategy>>) -> Result<Self> {
        options.validate()?;
        let containers = SelectorSet::new(&options.container_selectors)?;
        let texts = SelectorSet::new(&options.text_selectors)?;
        Ok(Self {
            options,
            containers,
            texts,
            strategies,
        })
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Latest message on the page, or an empty string when none is found.
    ///
    /// Strategies run one after another; each re-reads the page, so markup
    /// rendered while an earlier strategy waited is visible to later ones.
    pub async fn last_message(&self, page: &Page) -> String {
        let ctx = Context {
            options: &self.options,
            containers: &self.containers,
            texts: &self.texts,
        };

        for strategy in &self.strategies {
            if let Some(text) = strategy.attempt(page, &ctx).await {
                info!(strategy = strategy.name(), preview = %preview(&text), "extracted last message");
                return text;
            }
            debug!(strategy = strategy.name(), "strategy found nothing");
        }

        info!("no message found");
        String::new()
    }

    /// Extract from a static document without waiting.
    ///
    /// Runs the cascade against the document as it is, then the generic
    /// search. Suited to saved pages where nothing renders later.
    #[must_use]
    pub fn extract_document(&self, doc: &Document) -> String {
        if let Some(pattern) = self.containers.first_matching(doc) {
            let containers = pattern.select_all(doc);
            if let Some(text) = extract_from_selection(&containers, pattern.source(), &self.texts, &self.options) {
                return text;
            }
        }
        generic_search(doc, &self.options).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Scripted {
        name: &'static str,
        answer: Option<&'static str>,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    #[async_trait(?Send)]
    impl Strategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn attempt(&self, _page: &Page, _ctx: &Context<'_>) -> Option<String> {
            self.calls.borrow_mut().push(self.name);
            self.answer.map(str::to_string)
        }
    }

    fn engine(plan: &[(&'static str, Option<&'static str>)]) -> (Engine, Rc<RefCell<Vec<&'static str>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let strategies: Vec<Box<dyn Strategy>> = plan
            .iter()
            .map(|&(name, answer)| {
                Box::new(Scripted {
                    name,
                    answer,
                    calls: Rc::clone(&calls),
                }) as Box<dyn Strategy>
            })
            .collect();
        (Engine::with_strategies(Options::default(), strategies).unwrap(), calls)
    }

    #[tokio::test]
    async fn first_answer_wins_and_stops() {
        let (engine, calls) = engine(&[("a", None), ("b", Some("from b")), ("c", Some("from c"))]);
        let page = Page::new("about:blank", "");
        assert_eq!(engine.last_message(&page).await, "from b");
        assert_eq!(*calls.borrow(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn empty_when_every_strategy_declines() {
        let (engine, calls) = engine(&[("a", None), ("b", None)]);
        let page = Page::new("about:blank", "");
        assert_eq!(engine.last_message(&page).await, "");
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn rejects_bad_selector_in_options() {
        let options = Options {
            text_selectors: vec!["p".into(), "::nonsense(".into()],
            ..Options::default()
        };
        assert!(matches!(Engine::new(options), Err(crate::Error::InvalidSelector(_))));
    }

    #[test]
    fn extract_document_uses_cascade_then_search() {
        let engine = Engine::new(Options::default()).unwrap();
        let doc = crate::dom::parse(
            r#"<main><div class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Cascade found this one</p></div></main>"#,
        );
        assert_eq!(engine.extract_document(&doc), "Cascade found this one");

        let doc = crate::dom::parse(
            r#"<main><section class="ThreadPane"><span>Search found this one instead</span></section></main>"#,
        );
        assert_eq!(engine.extract_document(&doc), "Search found this one instead");
    }
}
