//! Live page model.
//!
//! A `Page` holds the current address and markup of one browser tab. The
//! page's own renderer replaces the markup over time; the extraction engine
//! only reads it. Readers take a fresh `Document` snapshot whenever they need
//! one and never keep node lists across a suspension point.
//!
//! Structural-change notification rides on a `tokio::sync::watch` channel:
//! every `Observer` is a receiver, and dropping it deregisters it.

use std::sync::Arc;

use tokio::sync::watch;

use crate::dom::{self, Document};
use crate::encoding;

/// Observable state of a page.
#[derive(Debug, Clone)]
struct PageState {
    url: String,
    html: Arc<str>,
    revision: u64,
}

/// A mutable, observable HTML page. Clones share the same page.
#[derive(Debug, Clone)]
pub struct Page {
    state: Arc<watch::Sender<PageState>>,
}

impl Page {
    /// Create a page at `url` with the given markup.
    #[must_use]
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        let (tx, _) = watch::channel(PageState {
            url: url.into(),
            html: Arc::from(html),
            revision: 0,
        });
        Self { state: Arc::new(tx) }
    }

    /// Create a page from raw bytes, honouring a declared charset.
    #[must_use]
    pub fn from_bytes(url: impl Into<String>, html: &[u8]) -> Self {
        Self::new(url, &encoding::transcode_to_utf8(html))
    }

    /// Current address of the page.
    #[must_use]
    pub fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    /// Number of markup or address changes since the page was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Parse the current markup into a fresh document.
    #[must_use]
    pub fn snapshot(&self) -> Document {
        let html = Arc::clone(&self.state.borrow().html);
        dom::parse(&html)
    }

    /// Replace the rendered markup and notify observers.
    pub fn render(&self, html: &str) {
        self.state.send_modify(|state| {
            state.html = Arc::from(html);
            state.revision += 1;
        });
    }

    /// Change the address without a full reload, as an in-app router does.
    pub fn navigate(&self, url: impl Into<String>) {
        let url = url.into();
        self.state.send_modify(|state| {
            state.url = url;
            state.revision += 1;
        });
    }

    /// Register a structural-change observer.
    #[must_use]
    pub fn observe(&self) -> Observer {
        Observer {
            rx: self.state.subscribe(),
        }
    }

    /// Number of observers currently registered.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.receiver_count()
    }
}

/// Registration for change notifications on a `Page`.
///
/// Deregisters on drop.
#[derive(Debug)]
pub struct Observer {
    rx: watch::Receiver<PageState>,
}

impl Observer {
    /// Wait for the next batch of changes.
    ///
    /// Returns `false` once the page is gone and no further change can come.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
