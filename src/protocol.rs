//! Messages exchanged between the popup, the relay and the content script.
//!
//! The wire shape is JSON: requests are tagged by an `action` field and the
//! single response type carries `lastMessage`.

use serde::{Deserialize, Serialize};

/// A request addressed to the relay or the content script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Content script: extract the latest message from this page.
    GetLastMessage,
    /// Relay: find the active messaging tab and ask its content script.
    FetchLastMessage,
}

/// Answer to either request. An empty `last_message` means "nothing found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Response {
    /// Latest message text, possibly empty.
    pub last_message: String,
}

impl Response {
    /// Response carrying `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            last_message: text.into(),
        }
    }

    /// Response meaning "no message".
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
