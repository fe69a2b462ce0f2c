//! # rs-lastmessage
//!
//! Finds the most recent message in a messaging web app's conversation view
//! and relays it to a requesting UI.
//!
//! Extraction is a short cascade of strategies over a live page: wait for a
//! known message container to render and read the newest one, or, when the
//! markup has drifted away from every known selector, fall back to a
//! heuristic search of conversation-shaped elements. Nothing found is not
//! an error; the result is simply empty.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_lastmessage::extract_last_message;
//!
//! let html = r#"<ul>
//!   <li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Hi, thanks for connecting!</p></li>
//!   <li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Let's connect next week!</p></li>
//! </ul>"#;
//!
//! assert_eq!(extract_last_message(html)?, "Let's connect next week!");
//! # Ok::<(), rs_lastmessage::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Page`]: an observable page whose markup can change under the reader
//! - [`extractor::Engine`]: the strategy cascade
//! - [`ContentScript`]: per-page request handler
//! - [`relay::Relay`]: finds the active tab and forwards one round-trip
//! - [`reply`]: prompt building and parsing of generated reply suggestions

mod error;
mod options;
mod patterns;

/// DOM helpers over `dom_query`, including rendered-text emulation.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Observable page model.
pub mod page;

/// Selector sets and structural rules.
pub mod selector;

/// Line-level cleaning of rendered message text.
pub mod cleaning;

/// Waiter, cascade, fallback search and the extraction engine.
pub mod extractor;

/// In-app navigation tracking.
pub mod navigation;

/// Request and response messages.
pub mod protocol;

/// Per-page request handler.
pub mod content_script;

/// Tab lookup, injection and message forwarding.
pub mod relay;

/// Reply suggestion prompt and response parsing.
pub mod reply;

// Public API - re-exports
pub use content_script::ContentScript;
pub use error::{Error, Result};
pub use extractor::Engine;
pub use options::Options;
pub use page::Page;
pub use protocol::{Request, Response};

/// Extracts the latest message from static HTML using default options.
///
/// Runs the cascade and the generic search against the markup as given,
/// without waiting for rendering. Returns an empty string when no message
/// is found.
///
/// # Errors
///
/// Only fails if the built-in options are rejected, which does not happen
/// with the defaults.
pub fn extract_last_message(html: &str) -> Result<String> {
    extract_last_message_with_options(html, Options::default())
}

/// Extracts the latest message from static HTML with custom options.
///
/// # Errors
///
/// Returns `Error::InvalidOptions` or `Error::InvalidSelector` when the
/// options cannot be used.
pub fn extract_last_message_with_options(html: &str, options: Options) -> Result<String> {
    let engine = Engine::new(options)?;
    Ok(engine.extract_document(&dom::parse(html)))
}

/// Extracts the latest message from HTML bytes, honouring a declared charset.
///
/// ```rust
/// use rs_lastmessage::extract_last_message_bytes;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><div class=\"conversation-item\"><p>Merci, \xE0 bient\xF4t chez nous</p></div>";
/// assert_eq!(extract_last_message_bytes(html)?, "Merci, à bientôt chez nous");
/// # Ok::<(), rs_lastmessage::Error>(())
/// ```
///
/// # Errors
///
/// Same as [`extract_last_message`].
pub fn extract_last_message_bytes(html: &[u8]) -> Result<String> {
    extract_last_message(&encoding::transcode_to_utf8(html))
}
