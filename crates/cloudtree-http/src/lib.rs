//! CloudTree HTTP - remote store adapter over a JSON RPC API
//!
//! Provides an async client for:
//! - Folder listing with cursor pagination
//! - Metadata lookup, folder creation and deletion
//! - Streaming upload and download through the content endpoints
//! - Account lookup
//!
//! ## Modules
//!
//! - [`client`] - HTTP client, request construction and error decoding
//! - [`listing`] - Folder listing and metadata queries
//! - [`transfer`] - Streaming upload and download
//! - [`provider`] - [`IRemoteStore`](cloudtree_core::ports::IRemoteStore) implementation
//!
//! The client holds no credentials: every call takes the caller's token.

pub mod client;
pub mod listing;
pub mod provider;
pub mod transfer;
mod wire;

use cloudtree_core::domain::StoreError;
use thiserror::Error;

pub use client::StoreClient;
pub use provider::HttpRemoteStore;

/// Errors that can occur when talking to the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("API error ({status}): {summary}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `error_summary` from the body, or the raw body when absent
        summary: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be encoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the request never got a usable answer (timeout, connect or send failure)
    pub fn is_transport(&self) -> bool {
        match self {
            ApiError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Reason text to carry into a [`StoreError`]
    fn reason(&self) -> String {
        match self {
            ApiError::Status { summary, .. } => summary.clone(),
            other => other.to_string(),
        }
    }

    /// Converts into a [`StoreError`]
    ///
    /// Transport failures become `StoreError::Transport`; everything else is
    /// built by `operation` from the failure reason.
    pub fn into_store_error(self, operation: impl FnOnce(String) -> StoreError) -> StoreError {
        if self.is_transport() {
            StoreError::Transport(self.to_string())
        } else {
            operation(self.reason())
        }
    }
}
