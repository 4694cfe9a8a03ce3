//! Configuration options for the LIMS client

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default API gateway address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default storage entry holding the serialized session
pub const DEFAULT_SESSION_KEY: &str = "lims_auth";

/// Configuration options for the LIMS client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The API gateway base URL, without a trailing slash
    pub base_url: String,

    /// The request timeout; requests wait indefinitely when unset
    pub request_timeout: Option<Duration>,

    /// How often the balance view re-fetches balances
    pub poll_interval: Duration,

    /// The storage key of the persisted session
    pub session_key: String,

    /// Directory of the file-backed session storage
    pub session_dir: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            poll_interval: Duration::from_secs(30),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            session_dir: None,
        }
    }
}

impl ClientOptions {
    /// Load options from `LIMS_API_URL`, `LIMS_SESSION_DIR` and `LIMS_POLL_SECS`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(url) = std::env::var("LIMS_API_URL") {
            options = options.with_base_url(&url);
        }
        if let Ok(dir) = std::env::var("LIMS_SESSION_DIR") {
            options = options.with_session_dir(dir);
        }
        if let Ok(secs) = std::env::var("LIMS_POLL_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::general(format!("LIMS_POLL_SECS must be a whole number, got {:?}", secs))
            })?;
            options = options.with_poll_interval(Duration::from_secs(secs));
        }

        Ok(options)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the balance polling interval
    pub fn with_poll_interval(mut self, value: Duration) -> Self {
        self.poll_interval = value;
        self
    }

    /// Set the session storage key
    pub fn with_session_key(mut self, value: &str) -> Self {
        self.session_key = value.to_string();
        self
    }

    /// Set the session storage directory
    pub fn with_session_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_gateway() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "http://127.0.0.1:8000");
        assert_eq!(options.poll_interval, Duration::from_secs(30));
        assert_eq!(options.session_key, "lims_auth");
        assert!(options.request_timeout.is_none());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let options = ClientOptions::default().with_base_url("http://lims.plant.local:8080/");
        assert_eq!(options.base_url, "http://lims.plant.local:8080");
    }
}
