pub mod executor;
pub mod fetch;

pub use executor::{Executor, ExecutorError, SyncExecutor};
pub use fetch::{AssetFetcher, FetchError, InMemoryFetcher};
