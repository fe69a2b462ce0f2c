//! In-app navigation detection.
//!
//! Single-page messaging apps switch threads without a reload. The
//! watcher remembers the last address it saw so callers can tell when a
//! new thread was opened.

use tracing::info;

/// Tracks the last known page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationWatcher {
    last_url: String,
}

impl NavigationWatcher {
    /// Start watching from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { last_url: url.into() }
    }

    /// Record `current` and report whether it differs from the last address.
    pub fn changed(&mut self, current: &str) -> bool {
        if self.last_url == current {
            return false;
        }
        info!(from = %self.last_url, to = current, "page navigated");
        current.clone_into(&mut self.last_url);
        true
    }
}
