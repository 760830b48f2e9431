//! Client configuration.
//!
//! The request timeout is an explicit, documented default rather than
//! whatever the transport happens to pick: every call is bounded by
//! [`DEFAULT_TIMEOUT`] unless [`Config::timeout`] overrides it. There is no
//! retry or backoff policy anywhere in this crate.

use std::env;
use std::time::Duration;

use dotenv::dotenv;

use crate::error::{Error, Result};

/// Timeout applied to every request unless overridden (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!("carddesk-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl Config {
    /// Settings for the given API base URL, with the default timeout and
    /// user agent. Trailing slashes are trimmed so resource paths join
    /// cleanly.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header (default `carddesk-client/<version>`).
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load settings from the environment, reading a `.env` file first if
    /// one exists: `CARDDESK_BASE_URL` (required), `CARDDESK_TIMEOUT_SECS`
    /// and `CARDDESK_USER_AGENT` (optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `CARDDESK_BASE_URL` is unset or
    /// `CARDDESK_TIMEOUT_SECS` is not an integer.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let base_url = env::var("CARDDESK_BASE_URL")
            .map_err(|e| Error::Config(format!("CARDDESK_BASE_URL must be set: {e}")))?;
        let mut config = Self::new(base_url);

        if let Ok(raw) = env::var("CARDDESK_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("CARDDESK_TIMEOUT_SECS must be an integer: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(user_agent) = env::var("CARDDESK_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}
