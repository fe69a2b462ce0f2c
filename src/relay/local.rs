//! In-process browser.
//!
//! Hosts a set of `Page`s as tabs and wires them to `ContentScript`s
//! directly, with the same delivery semantics a real extension host has:
//! a tab without an injected script has no receiving end.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use tracing::debug;

use super::{DeliveryError, ScriptInjector, Tab, TabId, TabMessenger, TabQuery};
use crate::content_script::ContentScript;
use crate::page::Page;
use crate::protocol::{Request, Response};
use crate::Options;

struct LocalTab {
    id: TabId,
    page: Page,
    script: OnceCell<Rc<ContentScript>>,
    injections: Cell<u32>,
}

/// A browser whose tabs are in-memory pages.
pub struct LocalBrowser {
    options: Options,
    tabs: RefCell<Vec<Rc<LocalTab>>>,
    active: Cell<Option<TabId>>,
    next_id: Cell<TabId>,
}

impl LocalBrowser {
    /// Empty browser; injected scripts use `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            tabs: RefCell::new(Vec::new()),
            active: Cell::new(None),
            next_id: Cell::new(1),
        }
    }

    /// Open `page` in a new tab and make it active.
    pub fn open(&self, page: Page) -> TabId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.tabs.borrow_mut().push(Rc::new(LocalTab {
            id,
            page,
            script: OnceCell::new(),
            injections: Cell::new(0),
        }));
        self.active.set(Some(id));
        id
    }

    /// Make `tab` the active tab. Unknown ids clear the selection.
    pub fn activate(&self, tab: TabId) {
        let known = self.tab(tab).is_some();
        self.active.set(known.then_some(tab));
    }

    /// Page shown in `tab`.
    #[must_use]
    pub fn page(&self, tab: TabId) -> Option<Page> {
        self.tab(tab).map(|t| t.page.clone())
    }

    /// Number of content scripts ever installed in `tab`.
    #[must_use]
    pub fn injection_count(&self, tab: TabId) -> u32 {
        self.tab(tab).map_or(0, |t| t.injections.get())
    }

    fn tab(&self, id: TabId) -> Option<Rc<LocalTab>> {
        self.tabs.borrow().iter().find(|t| t.id == id).cloned()
    }
}

#[async_trait(?Send)]
impl TabQuery for LocalBrowser {
    async fn active_tab(&self) -> Option<Tab> {
        let tab = self.tab(self.active.get()?)?;
        Some(Tab {
            id: tab.id,
            url: Some(tab.page.url()),
        })
    }
}

#[async_trait(?Send)]
impl ScriptInjector for LocalBrowser {
    async fn ensure_injected(&self, id: TabId) -> Result<(), DeliveryError> {
        let tab = self
            .tab(id)
            .ok_or_else(|| DeliveryError::Failed(format!("no tab with id {id}")))?;
        if tab.script.get().is_some() {
            debug!(tab = id, "content script already present");
            return Ok(());
        }

        let script = ContentScript::new(tab.page.clone(), self.options.clone())
            .map_err(|err| DeliveryError::Failed(err.to_string()))?;
        if tab.script.set(Rc::new(script)).is_ok() {
            tab.injections.set(tab.injections.get() + 1);
            debug!(tab = id, "content script injected");
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TabMessenger for LocalBrowser {
    async fn send(&self, id: TabId, request: &Request) -> Result<Option<Response>, DeliveryError> {
        let tab = self
            .tab(id)
            .ok_or_else(|| DeliveryError::Failed(format!("no tab with id {id}")))?;
        let script = tab.script.get().cloned().ok_or(DeliveryError::NoReceiver)?;
        Ok(script.handle(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> (LocalBrowser, TabId) {
        let browser = LocalBrowser::new(Options::default());
        let id = browser.open(Page::new("https://www.linkedin.com/messaging/", "<main></main>"));
        (browser, id)
    }

    #[tokio::test]
    async fn injection_is_idempotent() {
        let (browser, id) = browser();
        browser.ensure_injected(id).await.unwrap();
        browser.ensure_injected(id).await.unwrap();
        assert_eq!(browser.injection_count(id), 1);
    }

    #[tokio::test]
    async fn send_without_script_has_no_receiver() {
        let (browser, id) = browser();
        let result = browser.send(id, &Request::GetLastMessage).await;
        assert_eq!(result, Err(DeliveryError::NoReceiver));
    }

    #[tokio::test]
    async fn unknown_tab_fails() {
        let (browser, _) = browser();
        assert!(matches!(browser.ensure_injected(99).await, Err(DeliveryError::Failed(_))));
        browser.activate(99);
        assert_eq!(browser.active_tab().await, None);
    }

    #[tokio::test]
    async fn latest_open_tab_is_active() {
        let (browser, _) = browser();
        let second = browser.open(Page::new("https://www.linkedin.com/feed/", ""));
        let active = browser.active_tab().await.unwrap();
        assert_eq!(active.id, second);
        assert_eq!(active.url.as_deref(), Some("https://www.linkedin.com/feed/"));
    }
}
