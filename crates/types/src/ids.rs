//! Newtype wrapper for the caller session identifier.
//!
//! The session id names both the workspace directory and the archive file, so
//! it is validated to be a single, safe path segment.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIdError {
    Empty,
    InvalidCharacter(char),
}

impl fmt::Display for SessionIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionIdError::Empty => f.write_str("session id must not be empty"),
            SessionIdError::InvalidCharacter(c) => {
                write!(f, "session id contains an invalid character: {:?}", c)
            }
        }
    }
}

impl std::error::Error for SessionIdError {}

/// An opaque identifier scoping one caller's workspace and archive.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SessionId(Arc<str>);

impl SessionId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, SessionIdError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(SessionIdError::Empty);
        }
        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SessionIdError::InvalidCharacter(bad));
        }
        Ok(Self(id.into()))
    }

    /// Returns the string representation of this session id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the archive produced for this session.
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl TryFrom<&str> for SessionId {
    type Error = SessionIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
