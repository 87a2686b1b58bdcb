//! AssetFetcher trait for abstracting remote byte retrieval.
//!
//! The pipeline fetches stylesheets and font files through this trait so it
//! is not tied to a particular HTTP transport.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

/// Error type for fetch operations. Always carries the URL that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} could not be reached: {message}")]
    Transport { url: String, message: String },

    #[error("{url} body could not be read: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// A trait for retrieving raw bytes from a URL.
///
/// # Implementations
///
/// - `HttpFetcher`: HTTP GET with timeout and user agent (fonthunter-resource)
/// - `InMemoryFetcher`: Serves pre-populated responses (always available)
///
/// # Example
///
/// ```ignore
/// let fetcher = InMemoryFetcher::new();
/// fetcher.add("https://fonts.example.com/a.woff2", font_bytes)?;
/// let data = fetcher.fetch("https://fonts.example.com/a.woff2")?;
/// ```
pub trait AssetFetcher: Send + Sync + Debug {
    /// Fetch the body behind `url`. Only successful (2xx) responses yield bytes.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<T: AssetFetcher + ?Sized> AssetFetcher for Arc<T> {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An in-memory fetcher.
///
/// Responses are registered up front; unknown URLs answer with HTTP 404 and
/// URLs registered through [`InMemoryFetcher::fail`] report a transport error.
/// Every requested URL is recorded, which lets tests assert on fetch order.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    responses: RwLock<HashMap<String, Arc<Vec<u8>>>>,
    failures: RwLock<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
}

fn poisoned(url: &str) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message: "fetcher lock poisoned".to_string(),
    }
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body served for `url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the internal lock is poisoned.
    pub fn add(&self, url: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<(), FetchError> {
        let url = url.into();
        let mut responses = self.responses.write().map_err(|_| poisoned(&url))?;
        responses.insert(url, Arc::new(data.into()));
        Ok(())
    }

    /// Make every fetch of `url` fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the internal lock is poisoned.
    pub fn fail(&self, url: impl Into<String>, message: impl Into<String>) -> Result<(), FetchError> {
        let url = url.into();
        let mut failures = self.failures.write().map_err(|_| poisoned(&url))?;
        failures.insert(url, message.into());
        Ok(())
    }

    /// URLs requested so far, in call order.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of times `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.iter().filter(|u| *u == url).count())
            .unwrap_or(0)
    }
}

impl AssetFetcher for InMemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let failures = self.failures.read().map_err(|_| poisoned(url))?;
        if let Some(message) = failures.get(url) {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        drop(failures);

        let responses = self.responses.read().map_err(|_| poisoned(url))?;
        responses
            .get(url)
            .map(|data| data.as_ref().clone())
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    fn name(&self) -> &'static str {
        "InMemoryFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_fetcher_add_and_fetch() {
        let fetcher = InMemoryFetcher::new();
        fetcher.add("https://a.test/x.woff2", b"font".to_vec()).unwrap();

        let data = fetcher.fetch("https://a.test/x.woff2").unwrap();
        assert_eq!(data, b"font");
    }

    #[test]
    fn test_in_memory_fetcher_unknown_url_is_404() {
        let fetcher = InMemoryFetcher::new();
        let err = fetcher.fetch("https://a.test/missing.ttf").unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                url: "https://a.test/missing.ttf".to_string(),
                status: 404
            }
        );
        assert_eq!(err.url(), "https://a.test/missing.ttf");
    }

    #[test]
    fn test_in_memory_fetcher_failure_wins_over_response() {
        let fetcher = InMemoryFetcher::new();
        fetcher.add("https://a.test/x.ttf", b"font".to_vec()).unwrap();
        fetcher.fail("https://a.test/x.ttf", "connection reset").unwrap();

        let err = fetcher.fetch("https://a.test/x.ttf").unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.to_string().contains("connection reset"));
        assert!(err.to_string().contains("https://a.test/x.ttf"));
    }

    #[test]
    fn test_in_memory_fetcher_records_requests() {
        let fetcher = InMemoryFetcher::new();
        let _ = fetcher.fetch("https://a.test/1");
        let _ = fetcher.fetch("https://a.test/2");
        let _ = fetcher.fetch("https://a.test/1");

        assert_eq!(
            fetcher.requests(),
            vec!["https://a.test/1", "https://a.test/2", "https://a.test/1"]
        );
        assert_eq!(fetcher.request_count("https://a.test/1"), 2);
    }

    #[test]
    fn test_shared_fetcher_delegates() {
        let fetcher = Arc::new(InMemoryFetcher::new());
        fetcher.add("u", vec![1, 2, 3]).unwrap();
        let shared: Arc<dyn AssetFetcher> = fetcher.clone();
        assert_eq!(shared.fetch("u").unwrap(), vec![1, 2, 3]);
        assert_eq!(shared.name(), "InMemoryFetcher");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            url: "https://a.test/f.otf".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://a.test/f.otf returned HTTP status 503");
    }
}
