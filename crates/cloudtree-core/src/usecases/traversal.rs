//! Remote tree traversal use case
//!
//! Enumerates the remote tree through [`IRemoteStore`] and classifies the
//! results. Store failures are propagated unmodified; nothing is retried and
//! no partial listing is returned.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{AccessToken, Entry, FolderEntry, RemotePath, StoreError, TraversalRequest};
use crate::ports::IRemoteStore;
use crate::usecases::classify::{Classified, EntryClassifier};

/// Use case for discovering entries in the remote tree
#[derive(Clone)]
pub struct TraversalEngine {
    store: Arc<dyn IRemoteStore>,
}

impl TraversalEngine {
    /// Creates a new TraversalEngine over the given remote store
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self { store }
    }

    /// Lists the folders directly under the store root
    ///
    /// Files and unrecognized entries at the root are discarded by the same
    /// rule as [`EntryClassifier::classify`].
    #[instrument(skip_all)]
    pub async fn list_roots(&self, token: &AccessToken) -> Result<Vec<FolderEntry>, StoreError> {
        let entries = self
            .list_tree(token, &TraversalRequest::shallow(RemotePath::root()))
            .await?;
        let folders = EntryClassifier::classify(entries).folders;

        for folder in &folders {
            debug!(folder = %folder.path, "found root folder");
        }

        Ok(folders)
    }

    /// Lists the entries under `request.root_path`
    ///
    /// When `request.recursive` is set every descendant level is included.
    /// Unrecognized entry kinds are returned as `Entry::Other`.
    #[instrument(skip(self, token), fields(root = %request.root_path, recursive = request.recursive))]
    pub async fn list_tree(
        &self,
        token: &AccessToken,
        request: &TraversalRequest,
    ) -> Result<Vec<Entry>, StoreError> {
        let entries = self
            .store
            .list_entries(token, &request.root_path, request.recursive)
            .await?;

        debug!(count = entries.len(), "listed entries");
        Ok(entries)
    }

    /// Fetches the metadata of the single entry at `path`
    ///
    /// # Errors
    ///
    /// `StoreError::List` if the path does not exist
    #[instrument(skip(self, token), fields(path = %path))]
    pub async fn metadata(&self, token: &AccessToken, path: &RemotePath) -> Result<Entry, StoreError> {
        self.store.get_metadata(token, path).await
    }

    /// Recursively lists `path` and partitions the result into files and folders
    ///
    /// On error nothing is returned besides the error; callers that want the
    /// empty fallback can use `unwrap_or_default()` on the result.
    #[instrument(skip(self, token), fields(path = %path))]
    pub async fn find_files_and_dirs(
        &self,
        token: &AccessToken,
        path: &RemotePath,
    ) -> Result<Classified, StoreError> {
        let entries = self
            .list_tree(token, &TraversalRequest::recursive(path.clone()))
            .await?;
        let classified = EntryClassifier::classify(entries);

        debug!(
            files = classified.files.len(),
            folders = classified.folders.len(),
            skipped = classified.skipped,
            "classified entries"
        );
        Ok(classified)
    }
}
