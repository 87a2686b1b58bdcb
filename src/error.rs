// src/error.rs
use fonthunter_traits::ExecutorError;
use fonthunter_types::SessionIdError;
use std::path::PathBuf;
use thiserror::Error;

/// A comprehensive error type for the font hunting pipeline.
///
/// Inside `generate` these are turned into error notes on the result; they
/// only escape as `Err` from construction and from the lower-level stages.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration is invalid: {0}")]
    Configuration(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid session id: {0}")]
    InvalidSession(#[from] SessionIdError),

    #[error("No font URLs found in CSS")]
    NoAssetsFound,

    #[error("No fonts found/downloaded")]
    NoFontsDownloaded,

    #[error("Unable to write CSS content to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive failed: {0}")]
    Archive(String),

    #[error("Zip file not found: {0}")]
    NotFound(String),

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Configuration file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
