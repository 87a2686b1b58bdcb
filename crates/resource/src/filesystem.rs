//! Filesystem lookup of finished archives under the storage root.
//!
//! Download requests carry a caller-supplied path, so every lookup is checked
//! to stay inside the storage root.
//!
//! # Security
//!
//! The provider validates that all resolved paths remain within the base path
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for resource lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

/// Resolves resources relative to a base directory.
///
/// # Security
///
/// This provider prevents path traversal attacks by canonicalizing paths
/// and verifying they remain within the base directory. Attempts to access
/// files outside the base path will return a `NotFound` error.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for security checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// Creates a new filesystem resource provider with the given base path.
    ///
    /// The base path is canonicalized to enable security checks.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the storage root has not been created yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Returns the base path for this provider.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves and validates a resource path relative to the base path.
    ///
    /// Returns `None` if the path would escape the base directory (path traversal attack).
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if path.is_empty() || Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // If canonicalization fails (file doesn't exist), do basic path component check
        for component in Path::new(path).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        Some(full_path)
    }

    /// Resolves `path` to an existing file inside the base directory.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (path traversal blocked)", path)))?;
        if full_path.is_file() {
            Ok(full_path)
        } else {
            Err(ResourceError::NotFound(path.to_string()))
        }
    }

    /// Opens the file behind `path` for streaming.
    pub fn open(&self, path: &str) -> Result<(PathBuf, File), ResourceError> {
        let full_path = self.resolve(path)?;
        File::open(&full_path)
            .map(|file| (full_path, file))
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResourceError::NotFound(path.to_string())
                } else {
                    ResourceError::LoadFailed {
                        path: path.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }
}
