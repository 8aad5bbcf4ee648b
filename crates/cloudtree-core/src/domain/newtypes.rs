//! Newtype wrappers for validated domain values
//!
//! - [`RemotePath`] - a store-relative path; the empty string is the store root
//! - [`AccessToken`] - the opaque per-call credential

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RemotePath
// ============================================================================

/// Path of an item inside the remote store
///
/// The store root is represented by the empty string, which is also what the
/// remote API expects for the root. `"/"` is accepted as an alias for the root
/// and normalized to `""`. Every other path starts with `/` and has no
/// trailing slash.
///
/// Case is preserved; use [`RemotePath::to_lowercase`] for the normalized
/// identity form carried by entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a new RemotePath
    ///
    /// # Errors
    /// Returns error if the path is not rooted, contains empty segments,
    /// or contains `.` / `..` segments
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();

        if path.is_empty() || path == "/" {
            return Ok(Self::root());
        }

        if !path.starts_with('/') {
            return Err(DomainError::InvalidRemotePath(format!(
                "Remote path must start with '/': {path}"
            )));
        }

        if path.contains("//") {
            return Err(DomainError::InvalidRemotePath(format!(
                "Remote path contains invalid double slashes: {path}"
            )));
        }

        let trimmed = path.strip_suffix('/').unwrap_or(&path);

        if trimmed[1..].split('/').any(|seg| seg == "." || seg == "..") {
            return Err(DomainError::InvalidRemotePath(format!(
                "Remote path contains invalid traversal: {path}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The store root
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns true if this is the store root
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire form of the path (`""` for the root)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used as the entry identity
    #[must_use]
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.to_lowercase())
    }

    /// Join a path component
    ///
    /// # Errors
    /// Returns error if component is empty or contains a separator
    pub fn join(&self, component: &str) -> Result<Self, DomainError> {
        if component.is_empty() || component.contains('/') {
            return Err(DomainError::InvalidRemotePath(format!(
                "Invalid path component: {component}"
            )));
        }

        Self::new(format!("{}/{component}", self.0))
    }

    /// Get the parent path (`None` for the root)
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        self.0.rfind('/').map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Get the last path component (`None` for the root)
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }

        self.0.rsplit('/').next()
    }

    /// Iterate over the path components
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for RemotePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RemotePath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

// ============================================================================
// AccessToken
// ============================================================================

/// Opaque bearer credential supplied by the caller on every operation
///
/// The token is never retained by the engines and never printed:
/// `Debug` and `Display` redact it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    ///
    /// # Errors
    /// Returns error if the token is empty or contains whitespace
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        let token = token.trim();

        if token.is_empty() {
            return Err(DomainError::InvalidToken(
                "Access token cannot be empty".to_string(),
            ));
        }

        if token.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidToken(
                "Access token cannot contain whitespace".to_string(),
            ));
        }

        Ok(Self(token.to_string()))
    }

    /// Raw token value, for building the Authorization header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl Display for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl FromStr for AccessToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
