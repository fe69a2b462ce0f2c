//! Relay configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Delay schedule between delivery retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "delay_ms", rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant(#[serde(with = "millis")] Duration),
    /// Linear increase: delay * attempt.
    Linear(#[serde(with = "millis")] Duration),
    /// Exponential: delay * 2^(attempt - 1).
    Exponential(#[serde(with = "millis")] Duration),
}

impl BackoffStrategy {
    /// Delay before the retry that follows failed attempt `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Constant(d) => *d,
            Self::Linear(d) => d.saturating_mul(attempt),
            Self::Exponential(d) => d.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1))),
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Linear(Duration::from_millis(250))
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// The site section the relay serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteTarget {
    /// Registrable host; subdomains match too.
    pub host: String,
    /// Path prefix of the messaging section.
    pub path_prefix: String,
}

impl Default for SiteTarget {
    fn default() -> Self {
        Self {
            host: "linkedin.com".into(),
            path_prefix: "/messaging".into(),
        }
    }
}

impl SiteTarget {
    /// Whether `address` points into the messaging section of the site.
    ///
    /// Addresses that do not parse as absolute URLs never match.
    #[must_use]
    pub fn matches(&self, address: &str) -> bool {
        let Ok(url) = Url::parse(address) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        let host_ok = host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .is_some_and(|rest| rest.ends_with('.'));
        host_ok && url.path().starts_with(&self.path_prefix)
    }
}

/// Configuration for the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayOptions {
    /// Deadline for one whole round-trip.
    ///
    /// Default: `14000`
    pub overall_timeout_ms: u64,

    /// Deadline the requesting UI applies on its side. The relay must
    /// answer strictly before it.
    ///
    /// Default: `15000`
    pub ui_timeout_ms: u64,

    /// Sends attempted while the content script is not yet listening.
    ///
    /// Default: `5`
    pub max_delivery_attempts: u32,

    /// Delay schedule between those attempts.
    pub backoff: BackoffStrategy,

    /// Pages the relay is allowed to talk to.
    pub site: SiteTarget,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            overall_timeout_ms: 14_000,
            ui_timeout_ms: 15_000,
            max_delivery_attempts: 5,
            backoff: BackoffStrategy::default(),
            site: SiteTarget::default(),
        }
    }
}

impl RelayOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for malformed JSON and `Error::InvalidOptions`
    /// for inconsistent values.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the deadlines and attempt budget.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.overall_timeout_ms >= self.ui_timeout_ms {
            return Err(Error::InvalidOptions(format!(
                "overall_timeout_ms ({}) must be below ui_timeout_ms ({})",
                self.overall_timeout_ms, self.ui_timeout_ms
            )));
        }
        if self.max_delivery_attempts == 0 {
            return Err(Error::InvalidOptions("max_delivery_attempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Round-trip deadline as a `Duration`.
    #[must_use]
    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_schedules() {
        let base = Duration::from_millis(250);
        assert_eq!(BackoffStrategy::Constant(base).delay(3), base);
        assert_eq!(BackoffStrategy::Linear(base).delay(3), Duration::from_millis(750));
        assert_eq!(BackoffStrategy::Exponential(base).delay(1), base);
        assert_eq!(BackoffStrategy::Exponential(base).delay(3), Duration::from_millis(1000));
    }

    #[test]
    fn site_target_matching() {
        let site = SiteTarget::default();
        assert!(site.matches("https://www.linkedin.com/messaging/"));
        assert!(site.matches("https://linkedin.com/messaging/thread/2-abc/"));
        assert!(!site.matches("https://www.linkedin.com/feed/"));
        assert!(!site.matches("https://notlinkedin.com/messaging/"));
        assert!(!site.matches("https://example.com/linkedin.com/messaging"));
        assert!(!site.matches("chrome://newtab/"));
        assert!(!site.matches("not a url"));
    }

    #[test]
    fn relay_deadline_must_beat_ui() {
        assert!(RelayOptions::default().validate().is_ok());
        let options = RelayOptions {
            overall_timeout_ms: 15_000,
            ..RelayOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn json_overrides_backoff() {
        let json = r#"{"max_delivery_attempts":3,"backoff":{"kind":"exponential","delay_ms":100}}"#;
        let options = RelayOptions::from_json(json).unwrap();
        assert_eq!(options.max_delivery_attempts, 3);
        assert_eq!(options.backoff, BackoffStrategy::Exponential(Duration::from_millis(100)));
        assert_eq!(options.overall_timeout_ms, 14_000);
    }
}
