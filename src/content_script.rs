//! Per-page request handler.
//!
//! One `ContentScript` lives in each messaging tab. It owns the extraction
//! engine for that page and answers `getLastMessage` requests with exactly
//! one response.

use std::cell::RefCell;

use tracing::debug;

use crate::extractor::Engine;
use crate::navigation::NavigationWatcher;
use crate::page::Page;
use crate::protocol::{Request, Response};
use crate::{Options, Result};

/// Request handler bound to one page.
pub struct ContentScript {
    page: Page,
    engine: Engine,
    navigation: RefCell<NavigationWatcher>,
}

impl ContentScript {
    /// Attach to `page`.
    ///
    /// # Errors
    ///
    /// Fails when the options are invalid or a selector does not compile.
    pub fn new(page: Page, options: Options) -> Result<Self> {
        let engine = Engine::new(options)?;
        let navigation = RefCell::new(NavigationWatcher::new(page.url()));
        Ok(Self {
            page,
            engine,
            navigation,
        })
    }

    /// Page this script is attached to.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Answer a request, or `None` when it is not addressed to a content script.
    pub async fn handle(&self, request: &Request) -> Option<Response> {
        match request {
            Request::GetLastMessage => {
                let url = self.page.url();
                if !self.navigation.borrow_mut().changed(&url) {
                    debug!(%url, "extracting on unchanged page");
                }
                let text = self.engine.last_message(&self.page).await;
                Some(Response::new(text))
            }
            Request::FetchLastMessage => None,
        }
    }
}
