//! HTTP-backed asset fetcher.

use fonthunter_traits::{AssetFetcher, FetchError};
use log::{debug, error};
use std::fmt;
use std::time::Duration;

/// User agent sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 FontHunter/1.0";

/// Upper bound on a single request, connection and body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest response body accepted by default.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Fetches assets with a blocking HTTP GET.
///
/// Only 2xx responses produce bytes. Redirects are followed by the
/// underlying agent; every other status, transport failure or timeout comes
/// back as a [`FetchError`]. Bodies larger than `max_body_bytes` are a
/// [`FetchError::Body`].
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
    timeout: Duration,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_settings(user_agent: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            user_agent: user_agent.into(),
            timeout,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| {
                error!("Error fetching {}: {}", url, e);
                match e {
                    ureq::Error::StatusCode(status) => FetchError::Status {
                        url: url.to_string(),
                        status,
                    },
                    other => FetchError::Transport {
                        url: url.to_string(),
                        message: other.to_string(),
                    },
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}
