//! Web font discovery and repackaging, plus a placeholder avatar synthesizer.
//!
//! [`FontHunterPipeline::generate`] fetches a stylesheet, downloads every
//! font it references into a session workspace, writes a stylesheet pointing
//! at the local copies and zips the lot. [`FontHunterPipeline::download`]
//! hands that archive out exactly once.
//!
//! ```ignore
//! use fonthunter::FontHunterBuilder;
//!
//! let pipeline = FontHunterBuilder::new()
//!     .with_storage_root("/var/lib/fonthunter")
//!     .with_session("5f0c2a")
//!     .build()?;
//! let result = pipeline.generate("https://fonts.example.com/css?family=Roboto:400,700");
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod avatar;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod source_url;

pub use config::FontHunterConfig;
pub use error::PipelineError;
pub use pipeline::{ArchiveDownload, FontHunterBuilder, FontHunterPipeline};
pub use source_url::normalize_source_url;

pub use fonthunter_executor::ExecutorImpl;
pub use fonthunter_resource::HttpFetcher;
pub use fonthunter_traits::{AssetFetcher, FetchError, InMemoryFetcher};
pub use fonthunter_types::{DownloadFailure, PipelineResult, SessionId};
