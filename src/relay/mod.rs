//! Orchestration relay.
//!
//! The relay runs outside the page. It finds the active tab, checks that
//! the tab shows the messaging section, makes sure a content script is
//! listening there and forwards one `getLastMessage` round-trip, all under
//! a deadline shorter than the requesting UI's own.
//!
//! Browser access goes through three small collaborator traits so the relay
//! can be driven by a real extension host or by [`local::LocalBrowser`].

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::protocol::{Request, Response};
use crate::{Error, Result};

pub mod local;
mod options;

pub use options::{BackoffStrategy, RelayOptions, SiteTarget};

/// Browser tab identifier.
pub type TabId = u32;

/// A browser tab as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Tab identifier.
    pub id: TabId,
    /// Current address, when the host exposes it.
    pub url: Option<String>,
}

/// Why a message did not reach a content script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// Nothing in the tab is listening yet.
    #[error("no receiving end in tab")]
    NoReceiver,
    /// Any other transport failure.
    #[error("{0}")]
    Failed(String),
}

/// Finds the tab the user is looking at.
#[async_trait(?Send)]
pub trait TabQuery {
    /// Active tab of the current window, if any.
    async fn active_tab(&self) -> Option<Tab>;
}

/// Installs the content script into a tab.
#[async_trait(?Send)]
pub trait ScriptInjector {
    /// Make sure exactly one content script is installed in `tab`.
    ///
    /// Calling this again for a tab that already has one is a no-op.
    async fn ensure_injected(&self, tab: TabId) -> std::result::Result<(), DeliveryError>;
}

/// Delivers requests to a tab's content script.
#[async_trait(?Send)]
pub trait TabMessenger {
    /// Send `request` and wait for the reply.
    ///
    /// `Ok(None)` means the script answered without a body.
    async fn send(&self, tab: TabId, request: &Request) -> std::result::Result<Option<Response>, DeliveryError>;
}

/// Everything the relay needs from the browser.
pub trait Browser: TabQuery + ScriptInjector + TabMessenger {}

impl<T: TabQuery + ScriptInjector + TabMessenger + ?Sized> Browser for T {}

/// Forwards last-message requests from the UI to the active tab.
pub struct Relay<B> {
    browser: B,
    options: RelayOptions,
}

impl<B: Browser> Relay<B> {
    /// Create a relay over `browser`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` when the relay deadline is not
    /// strictly shorter than the UI deadline.
    pub fn new(browser: B, options: RelayOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { browser, options })
    }

    /// The browser the relay talks to.
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Options the relay was built with.
    pub fn options(&self) -> &RelayOptions {
        &self.options
    }

    /// Ask the active messaging tab for its latest message.
    ///
    /// No active tab, or a tab outside the messaging section, yields an
    /// empty response without touching the tab.
    ///
    /// # Errors
    ///
    /// `Error::RelayTimeout` when no answer arrives before the deadline and
    /// `Error::Delivery` when the request cannot be delivered.
    pub async fn fetch_last_message(&self) -> Result<Response> {
        let Some(tab) = self.browser.active_tab().await else {
            debug!("no active tab");
            return Ok(Response::empty());
        };

        let on_site = tab.url.as_deref().is_some_and(|url| self.options.site.matches(url));
        if !on_site {
            debug!(tab = tab.id, url = ?tab.url, "active tab is not a messaging page");
            return Ok(Response::empty());
        }

        let deadline = self.options.overall_timeout();
        match tokio::time::timeout(deadline, self.round_trip(tab.id)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(tab = tab.id, ?deadline, "content script did not answer in time");
                Err(Error::RelayTimeout(deadline))
            }
        }
    }

    /// Dispatch a UI request. Requests meant for content scripts yield `None`.
    pub async fn handle(&self, request: &Request) -> Option<Result<Response>> {
        match request {
            Request::FetchLastMessage => Some(self.fetch_last_message().await),
            Request::GetLastMessage => None,
        }
    }

    async fn round_trip(&self, tab: TabId) -> Result<Response> {
        self.browser
            .ensure_injected(tab)
            .await
            .map_err(|err| Error::Delivery {
                attempts: 0,
                reason: format!("injection failed: {err}"),
            })?;

        let max = self.options.max_delivery_attempts;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.browser.send(tab, &Request::GetLastMessage).await {
                Ok(response) => {
                    let response = response.unwrap_or_default();
                    info!(tab, attempt, empty = response.last_message.is_empty(), "content script answered");
                    return Ok(response);
                }
                Err(DeliveryError::NoReceiver) if attempt < max => {
                    let delay = self.options.backoff.delay(attempt);
                    debug!(tab, attempt, ?delay, "content script not listening yet, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    warn!(tab, attempt, error = %err, "delivery failed");
                    return Err(Error::Delivery {
                        attempts: attempt,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
