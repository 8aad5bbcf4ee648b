//! Content transfer use case
//!
//! Moves bytes between the remote store and either a local sink, an
//! in-memory buffer, or a caller-provided reader, and implements the
//! delete-then-create replace policy.
//!
//! ## Replace policy
//!
//! `replace` is not atomic: it deletes the path (best effort) and then
//! uploads the new content. A reader between the two steps may see the path
//! as absent, and two concurrent replaces of the same path race with
//! last-writer-wins. Only a failed upload is reported as an error; a failed
//! delete is returned in [`ReplaceOutcome::delete`].

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AccessToken, DeleteStep, FileEntry, FolderEntry, RemotePath, ReplaceOutcome, ReplaceState,
    StoreError, TransferOutcome,
};
use crate::ports::{ByteStream, CopyError, ILocalSink, IRemoteStore};

/// Use case for moving file content in and out of the remote store
#[derive(Clone)]
pub struct TransferEngine {
    store: Arc<dyn IRemoteStore>,
    sink: Arc<dyn ILocalSink>,
}

impl TransferEngine {
    /// Creates a new TransferEngine with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `store` - Remote store for upload, download and delete
    /// * `sink` - Local persistence for downloads written to disk
    pub fn new(store: Arc<dyn IRemoteStore>, sink: Arc<dyn ILocalSink>) -> Self {
        Self { store, sink }
    }

    /// Streams `content` into the remote store at `remote_path`
    ///
    /// The store's own commit semantics apply; no conflict detection is
    /// added here.
    ///
    /// # Errors
    ///
    /// `StoreError::Upload`, or `StoreError::Transport` from the transport
    #[instrument(skip(self, token, content), fields(path = %remote_path))]
    pub async fn upload(
        &self,
        token: &AccessToken,
        remote_path: &RemotePath,
        content: ByteStream,
    ) -> Result<TransferOutcome, StoreError> {
        let stored = self.store.upload(token, remote_path, content).await?;

        info!(bytes = stored.size, rev = %stored.rev, "uploaded file");
        Ok(TransferOutcome::completed(remote_path.clone(), stored.size))
    }

    /// Opens a content stream for `entry`
    ///
    /// Read errors on the returned stream mean the transfer was interrupted.
    ///
    /// # Errors
    ///
    /// `StoreError::Download` if the path no longer exists
    #[instrument(skip(self, token, entry), fields(path = %entry.path))]
    pub async fn download(
        &self,
        token: &AccessToken,
        entry: &FileEntry,
    ) -> Result<ByteStream, StoreError> {
        debug!("opening download stream");
        let download = self.store.download(token, &entry.path).await?;
        Ok(download.stream)
    }

    /// Downloads `entry` and writes it to `local_path`
    ///
    /// Missing parent directories are created. The local handle is dropped,
    /// and so released, on every return path: success, interrupted
    /// download, or local write failure.
    ///
    /// # Errors
    ///
    /// - `StoreError::Download` if the stream cannot be opened or breaks mid-way
    /// - `StoreError::LocalWrite` if the file cannot be created or written
    #[instrument(skip(self, token, entry), fields(path = %entry.path, local = %local_path.display()))]
    pub async fn download_to_local(
        &self,
        token: &AccessToken,
        local_path: &Path,
        entry: &FileEntry,
    ) -> Result<TransferOutcome, StoreError> {
        let mut source = self.download(token, entry).await?;
        let mut handle = self.sink.create_with_parents(local_path).await?;

        let written = match self.sink.copy(&mut source, &mut handle).await {
            Ok(n) => n,
            Err(CopyError::Read(e)) => return Err(StoreError::download(&entry.path, e)),
            Err(CopyError::Write(e)) => return Err(StoreError::local_write(local_path, e)),
        };

        handle
            .shutdown()
            .await
            .map_err(|e| StoreError::local_write(local_path, e))?;

        info!(bytes = written, "downloaded file to disk");
        Ok(TransferOutcome::completed(entry.path.clone(), written))
    }

    /// Downloads `entry` fully into memory and decodes it as UTF-8
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD. No size cap is
    /// enforced: the whole file is held in memory, so this is meant for small
    /// files only.
    ///
    /// # Errors
    ///
    /// `StoreError::Download` if the stream cannot be opened or breaks mid-way
    #[instrument(skip(self, token, entry), fields(path = %entry.path))]
    pub async fn download_to_buffer(
        &self,
        token: &AccessToken,
        entry: &FileEntry,
    ) -> Result<String, StoreError> {
        let mut source = self.download(token, entry).await?;

        let mut buf = Vec::with_capacity(entry.size.min(1024 * 1024) as usize);
        source
            .read_to_end(&mut buf)
            .await
            .map_err(|e| StoreError::download(&entry.path, e))?;

        debug!(bytes = buf.len(), "downloaded file to memory");
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Replaces the content at `remote_path` by deleting then uploading
    ///
    /// The delete is best effort: its failure (typically "not found") is
    /// recorded in the outcome and does not stop the upload. The upload is
    /// authoritative and its failure is returned.
    ///
    /// # Errors
    ///
    /// Only the errors of the upload step (`StoreError::Upload`,
    /// `StoreError::Transport`)
    #[instrument(skip(self, token, content), fields(path = %remote_path))]
    pub async fn replace(
        &self,
        token: &AccessToken,
        remote_path: &RemotePath,
        content: ByteStream,
    ) -> Result<ReplaceOutcome, StoreError> {
        let mut state = ReplaceState::Start;
        debug!(%state, "replace started");

        state = ReplaceState::Deleting;
        debug!(%state, "deleting previous content");
        let delete = match self.store.delete(token, remote_path).await {
            Ok(_) => DeleteStep::Deleted,
            Err(e) => {
                warn!(error = %e, "failed to delete before replace, ignoring");
                DeleteStep::Skipped(e)
            }
        };

        state = ReplaceState::Creating;
        debug!(%state, "uploading new content");
        match self.upload(token, remote_path, content).await {
            Ok(upload) => {
                state = ReplaceState::Created;
                debug!(%state, "replace finished");
                Ok(ReplaceOutcome { delete, upload })
            }
            Err(e) => {
                state = ReplaceState::CreateFailed;
                warn!(%state, error = %e, "replace failed");
                Err(e)
            }
        }
    }

    /// Creates `local_path` and its missing parents as local directories
    ///
    /// # Errors
    ///
    /// `StoreError::LocalWrite` if a directory cannot be created
    pub async fn ensure_local_dir(&self, local_path: &Path) -> Result<(), StoreError> {
        self.sink.ensure_dir(local_path).await
    }

    /// Deletes the entry at `remote_path`
    ///
    /// # Errors
    ///
    /// `StoreError::Delete` if the store rejects the deletion
    #[instrument(skip(self, token), fields(path = %remote_path))]
    pub async fn remove(&self, token: &AccessToken, remote_path: &RemotePath) -> Result<(), StoreError> {
        self.store.delete(token, remote_path).await?;
        info!("deleted entry");
        Ok(())
    }

    /// Creates a folder at `remote_path`
    ///
    /// # Errors
    ///
    /// `StoreError::CreateFolder` if the store rejects the creation
    #[instrument(skip(self, token), fields(path = %remote_path))]
    pub async fn create_folder(
        &self,
        token: &AccessToken,
        remote_path: &RemotePath,
    ) -> Result<FolderEntry, StoreError> {
        let folder = self.store.create_folder(token, remote_path).await?;
        info!("created folder");
        Ok(folder)
    }
}
