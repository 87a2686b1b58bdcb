//! Platform implementations for the fonthunter pipeline.
//!
//! ## Available Providers
//!
//! - [`HttpFetcher`]: Fetches stylesheets and font files over HTTP
//! - [`FilesystemResourceProvider`]: Traversal-safe lookups under the storage root
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory fetcher from fonthunter-traits:
//! - [`InMemoryFetcher`]: Pre-populated responses for tests and offline runs

mod filesystem;
mod http;

pub use filesystem::{FilesystemResourceProvider, ResourceError};
pub use http::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpFetcher};

// Re-export the in-memory fetcher from fonthunter-traits for convenience
pub use fonthunter_traits::InMemoryFetcher;
