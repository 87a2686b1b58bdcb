use crate::error::PipelineError;
use fonthunter_resource::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STORAGE_ROOT: &str = "font-hunter";
pub const DEFAULT_FONTS_DIR: &str = "fonts";
pub const DEFAULT_CSS_DIR: &str = "css";
pub const DEFAULT_CSS_FILE_NAME: &str = "fonts.css";
pub const DEFAULT_MAX_PARALLEL_FETCHES: usize = 4;

/// Where and how the font hunter lays out its per-session output.
///
/// Missing keys in a TOML file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontHunterConfig {
    /// Directory holding every session workspace and archive.
    pub storage_root: PathBuf,
    /// Workspace subdirectory for downloaded font files.
    pub fonts_dir: String,
    /// Workspace subdirectory for the rewritten stylesheet.
    pub css_dir: String,
    /// File name of the rewritten stylesheet.
    pub file_name: String,
    pub max_parallel_fetches: usize,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Largest stylesheet or font body accepted from the network.
    pub max_body_bytes: u64,
}

impl Default for FontHunterConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            fonts_dir: DEFAULT_FONTS_DIR.to_string(),
            css_dir: DEFAULT_CSS_DIR.to_string(),
            file_name: DEFAULT_CSS_FILE_NAME.to_string(),
            max_parallel_fetches: DEFAULT_MAX_PARALLEL_FETCHES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FontHunterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        Self::from_toml_str(&source)
    }

    /// Trims surrounding whitespace and trailing separators from the
    /// directory and file names.
    pub fn normalized(mut self) -> Self {
        self.fonts_dir = self.fonts_dir.trim().trim_end_matches('/').to_string();
        self.css_dir = self.css_dir.trim().trim_end_matches('/').to_string();
        self.file_name = self.file_name.trim().to_string();
        self.user_agent = self.user_agent.trim().to_string();
        self
    }

    /// Rejects settings the pipeline cannot run with. Call on a
    /// [`normalized`](Self::normalized) config.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.storage_root.as_os_str().is_empty() {
            return Err(PipelineError::Configuration(
                "storage root is not set".to_string(),
            ));
        }
        for (key, value) in [
            ("fonts_dir", &self.fonts_dir),
            ("css_dir", &self.css_dir),
            ("file_name", &self.file_name),
        ] {
            if value.is_empty() {
                return Err(PipelineError::Configuration(format!("{} is not set", key)));
            }
            if Path::new(value.as_str()).is_absolute() || value.split('/').any(|s| s == "..") {
                return Err(PipelineError::Configuration(format!(
                    "{} must stay inside the session workspace: {}",
                    key, value
                )));
            }
        }
        if self.file_name.contains('/') {
            return Err(PipelineError::Configuration(format!(
                "file_name must be a plain file name: {}",
                self.file_name
            )));
        }
        if self.max_parallel_fetches == 0 {
            return Err(PipelineError::Configuration(
                "max_parallel_fetches must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PipelineError::Configuration(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(PipelineError::Configuration(
                "max_body_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
