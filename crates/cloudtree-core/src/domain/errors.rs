//! Domain error types
//!
//! [`DomainError`] covers validation of values built by the caller (paths,
//! tokens). [`StoreError`] is the taxonomy of operation failures reported by
//! the ports and propagated unmodified through the use cases.

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::newtypes::RemotePath;

/// Errors that can occur when building domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// Access token is missing or malformed
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Failures of remote store and local sink operations
///
/// Each variant names the operation that failed. `Transport` is reserved for
/// failures that are not specific to an operation: timeouts, cancellation,
/// and connection errors raised by the transport.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Enumeration of a path failed (not found, permission, malformed listing)
    #[error("Failed to list {path}: {reason}")]
    List { path: String, reason: String },

    /// Opening or reading a download stream failed
    #[error("Failed to download {path}: {reason}")]
    Download { path: String, reason: String },

    /// Creating or uploading a file failed
    #[error("Failed to upload {path}: {reason}")]
    Upload { path: String, reason: String },

    /// The remote store rejected a deletion
    #[error("Failed to delete {path}: {reason}")]
    Delete { path: String, reason: String },

    /// The remote store rejected a folder creation
    #[error("Failed to create folder {path}: {reason}")]
    CreateFolder { path: String, reason: String },

    /// Account identity could not be fetched
    #[error("Failed to fetch account: {0}")]
    Account(String),

    /// Local directory or file creation, or a local write, failed
    #[error("Failed to write local file {}: {source}", path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network, timeout or cancellation failure from the transport
    #[error("Transport error: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn list(path: &RemotePath, reason: impl Display) -> Self {
        Self::List {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn download(path: &RemotePath, reason: impl Display) -> Self {
        Self::Download {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn upload(path: &RemotePath, reason: impl Display) -> Self {
        Self::Upload {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn delete(path: &RemotePath, reason: impl Display) -> Self {
        Self::Delete {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn create_folder(path: &RemotePath, reason: impl Display) -> Self {
        Self::CreateFolder {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn local_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures raised by the transport rather than the store
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
