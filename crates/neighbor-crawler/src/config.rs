//! Crawler configuration
//!
//! Configuration can be built in code or loaded from YAML:
//!
//! ```yaml
//! base_url: http://localhost:8080/neighbors/
//! max_workers: 16
//! retry:
//!   max_attempts: 3
//!   backoff_base: 500ms
//!   connect_timeout: 5s
//!   request_timeout: 10s
//! ```

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{CrawlError, Result};

/// Default neighbors endpoint
pub const DEFAULT_BASE_URL: &str = "http://hollywood-graph-crawler.bridgesuncc.org/neighbors/";

/// Default cap on workers per level
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Client identifier sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Top-level crawler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Neighbors endpoint; the node name is appended as one path segment
    pub base_url: String,

    /// Upper bound on concurrent workers within a level
    pub max_workers: usize,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Per-request retry and timeout policy
    pub retry: RetryPolicy,

    /// Stop at the first empty level instead of emitting trailing empty levels
    pub stop_on_empty_level: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
            stop_on_empty_level: false,
        }
    }
}

impl CrawlerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(CrawlError::config("max_workers must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(CrawlError::config("retry.max_attempts must be at least 1"));
        }
        self.parsed_base_url()?;
        Ok(())
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| CrawlError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(CrawlError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_stop_on_empty_level(mut self, stop: bool) -> Self {
        self.stop_on_empty_level = stop;
        self
    }
}

/// Retry policy for a single neighbors request
///
/// Only transport failures are retried. After attempt `n` fails the fetcher
/// waits `backoff_base * n` before trying again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    #[serde(with = "humantime_serde")]
    pub backoff_base: Duration,

    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Bound on the whole request, body included
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Pause after the given failed attempt (1-indexed)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }
}
