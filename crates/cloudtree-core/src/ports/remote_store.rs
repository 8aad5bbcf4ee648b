//! Remote store port (driven/secondary port)
//!
//! This module defines the primitive capability set of the remote file store.
//! It is a pure protocol boundary: no retries, no caching, no business rules.
//!
//! ## Design Notes
//!
//! - Every method takes the caller's [`AccessToken`]. Implementations keep no
//!   credential or session state between calls, so a single instance can be
//!   shared across tasks.
//! - Errors are [`StoreError`] values already classified by operation;
//!   timeouts and connection failures are reported as `StoreError::Transport`.
//! - Content moves as [`ByteStream`]s so neither side has to buffer a whole
//!   file.

use std::fmt;
use std::pin::Pin;

use tokio::io::AsyncRead;

use crate::domain::{
    AccessToken, AccountInfo, Entry, FileEntry, FolderEntry, RemotePath, StoreError,
};

/// Readable byte stream used for uploads and downloads
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// An open download: the file's metadata and its content stream
pub struct Download {
    /// Metadata of the file as reported when the stream was opened
    pub entry: FileEntry,
    /// Content stream; read errors mean the transfer was interrupted
    pub stream: ByteStream,
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

/// Port trait for remote file store operations
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Lists the entries under `path`
    ///
    /// With `recursive` set, all descendant levels are returned, not just
    /// direct children. Entries are returned in the order the store reports
    /// them.
    ///
    /// # Errors
    /// `StoreError::List` if the path cannot be enumerated
    async fn list_entries(
        &self,
        token: &AccessToken,
        path: &RemotePath,
        recursive: bool,
    ) -> Result<Vec<Entry>, StoreError>;

    /// Retrieves the metadata of a single entry
    ///
    /// # Errors
    /// `StoreError::List` if the path does not exist
    async fn get_metadata(&self, token: &AccessToken, path: &RemotePath)
        -> Result<Entry, StoreError>;

    /// Creates a folder at `path`
    ///
    /// # Errors
    /// `StoreError::CreateFolder` if the store rejects the creation
    async fn create_folder(
        &self,
        token: &AccessToken,
        path: &RemotePath,
    ) -> Result<FolderEntry, StoreError>;

    /// Streams `content` into a file at `path`
    ///
    /// Commit semantics (overwrite or reject when the path exists) are the
    /// implementation's defaults.
    ///
    /// # Returns
    /// Metadata of the stored file
    ///
    /// # Errors
    /// `StoreError::Upload` if the store rejects the content
    async fn upload(
        &self,
        token: &AccessToken,
        path: &RemotePath,
        content: ByteStream,
    ) -> Result<FileEntry, StoreError>;

    /// Opens a content stream for the file at `path`
    ///
    /// # Errors
    /// `StoreError::Download` if the file does not exist or cannot be opened
    async fn download(&self, token: &AccessToken, path: &RemotePath)
        -> Result<Download, StoreError>;

    /// Deletes the entry at `path`
    ///
    /// # Returns
    /// Metadata of the deleted entry
    ///
    /// # Errors
    /// `StoreError::Delete` if the store rejects the deletion
    async fn delete(&self, token: &AccessToken, path: &RemotePath) -> Result<Entry, StoreError>;

    /// Retrieves the identity of the account owning `token`
    ///
    /// # Errors
    /// `StoreError::Account` if the identity cannot be fetched
    async fn get_account(&self, token: &AccessToken) -> Result<AccountInfo, StoreError>;
}
