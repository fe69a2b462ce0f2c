//! Configuration options for message extraction.
//!
//! The `Options` struct carries the selector cascade, the wait budgets and
//! every length threshold used by the heuristics. Defaults are tuned for
//! LinkedIn's messaging markup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::patterns::{CONTAINER_SELECTORS, TEXT_SELECTORS};
use crate::{Error, Result};

/// Configuration options for the extraction engine.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings. Durations are in milliseconds so the struct can
/// be loaded from JSON.
///
/// # Example
///
/// ```rust
/// use rs_lastmessage::Options;
///
/// let options = Options {
///     fallback_grace_ms: 0,
///     ..Options::default()
/// };
/// assert_eq!(options.substantial_line_len, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Structural selectors for conversation turns, most specific first.
    pub container_selectors: Vec<String>,

    /// Selectors for the message body inside a container, most specific first.
    pub text_selectors: Vec<String>,

    /// How long to wait for any container selector to match.
    ///
    /// Default: `9000`
    pub container_wait_ms: u64,

    /// Settle time before the generic search snapshots the page.
    ///
    /// Default: `1000`
    pub fallback_grace_ms: u64,

    /// Accepted message text must be longer than this (characters).
    ///
    /// Default: `10`
    pub min_message_len: usize,

    /// Cleaner drops lines shorter than this (characters).
    ///
    /// Default: `6`
    pub min_line_len: usize,

    /// Lines longer than this count as substantial (characters).
    ///
    /// Default: `20`
    pub substantial_line_len: usize,

    /// Only text shorter than this can be classified as UI metadata.
    ///
    /// Default: `30`
    pub ui_metadata_max_len: usize,

    /// Generic-search candidates must be longer than this (characters).
    ///
    /// Default: `20`
    pub candidate_min_len: usize,

    /// Generic-search candidates must be shorter than this (characters).
    ///
    /// Default: `2000`
    pub candidate_max_len: usize,

    /// Depth differences below this are ties in the generic-search ranking.
    ///
    /// Default: `2`
    pub depth_tolerance: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            container_selectors: CONTAINER_SELECTORS.iter().map(ToString::to_string).collect(),
            text_selectors: TEXT_SELECTORS.iter().map(ToString::to_string).collect(),
            container_wait_ms: 9000,
            fallback_grace_ms: 1000,
            min_message_len: 10,
            min_line_len: 6,
            substantial_line_len: 20,
            ui_metadata_max_len: 30,
            candidate_min_len: 20,
            candidate_max_len: 2000,
            depth_tolerance: 2,
        }
    }
}

impl Options {
    /// Parse options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for malformed JSON and `Error::InvalidOptions`
    /// when the thresholds contradict each other.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the thresholds for consistency.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.container_selectors.is_empty() {
            return Err(Error::InvalidOptions("container_selectors is empty".into()));
        }
        if self.text_selectors.is_empty() {
            return Err(Error::InvalidOptions("text_selectors is empty".into()));
        }
        if self.candidate_min_len >= self.candidate_max_len {
            return Err(Error::InvalidOptions(format!(
                "candidate_min_len ({}) must be below candidate_max_len ({})",
                self.candidate_min_len, self.candidate_max_len
            )));
        }
        if self.depth_tolerance == 0 {
            return Err(Error::InvalidOptions("depth_tolerance must be at least 1".into()));
        }
        Ok(())
    }

    /// Container wait budget as a `Duration`.
    #[must_use]
    pub fn container_wait(&self) -> Duration {
        Duration::from_millis(self.container_wait_ms)
    }

    /// Generic-search grace period as a `Duration`.
    #[must_use]
    pub fn fallback_grace(&self) -> Duration {
        Duration::from_millis(self.fallback_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_full_cascade() {
        let options = Options::default();
        assert_eq!(options.container_selectors.len(), CONTAINER_SELECTORS.len());
        assert_eq!(options.text_selectors.first().map(String::as_str), Some(".msg-s-event-listitem__body"));
        assert_eq!(options.container_wait(), Duration::from_secs(9));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let options = Options::from_json(r#"{"fallback_grace_ms": 5}"#).unwrap();
        assert_eq!(options.fallback_grace(), Duration::from_millis(5));
        assert_eq!(options.min_message_len, 10);
    }

    #[test]
    fn rejects_inverted_candidate_bounds() {
        let options = Options {
            candidate_min_len: 50,
            candidate_max_len: 50,
            ..Options::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn rejects_empty_selector_lists() {
        let result = Options::from_json(r#"{"text_selectors": []}"#);
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn reports_malformed_json() {
        assert!(matches!(Options::from_json("{"), Err(Error::Config(_))));
    }
}
