//! Error types for rs-lastmessage.
//!
//! Not finding a message is never an error: extraction degrades to an empty
//! string. The variants here cover configuration mistakes, relay-level
//! failures and reply-suggestion parsing.

use std::time::Duration;

/// Error type for extraction, relay and reply operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A CSS selector in a selector set could not be compiled.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Option values are inconsistent with each other.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Options could not be read from JSON.
    #[error("Configuration parse failed: {0}")]
    Config(#[from] serde_json::Error),

    /// The content script never answered within the relay deadline.
    #[error("Content script did not respond within {0:?}")]
    RelayTimeout(Duration),

    /// The request could not be delivered to the content script.
    #[error("Delivery failed after {attempts} attempt(s): {reason}")]
    Delivery {
        /// Number of send attempts made.
        attempts: u32,
        /// Last delivery failure reported by the messenger.
        reason: String,
    },

    /// The generative API withheld its answer.
    #[error("Response blocked by safety filters ({0})")]
    SafetyBlocked(String),

    /// The generative API response did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    /// No usable reply could be parsed from the generated text.
    #[error("No valid replies could be extracted")]
    NoReplies,
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
