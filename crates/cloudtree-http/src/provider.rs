//! HttpRemoteStore - IRemoteStore implementation over the HTTP API
//!
//! Wraps the [`StoreClient`] and delegates to the listing and transfer
//! modules to fulfil the [`IRemoteStore`] port contract.
//!
//! ## Design Notes
//!
//! - No lock is needed around the client: it holds no per-user state and
//!   every call carries its own token.
//! - [`ApiError`]s are classified here: timeouts, connection and send
//!   failures become `StoreError::Transport`; everything else becomes the
//!   error variant of the operation that failed.

use serde::Serialize;
use tracing::debug;

use cloudtree_core::domain::{
    AccessToken, AccountInfo, Entry, FileEntry, FolderEntry, RemotePath, StoreError,
};
use cloudtree_core::ports::{ByteStream, Download, IRemoteStore};

use crate::client::StoreClient;
use crate::wire::MetadataResult;
use crate::{listing, transfer, ApiError};

const CREATE_FOLDER: &str = "/2/files/create_folder_v2";
const DELETE: &str = "/2/files/delete_v2";

#[derive(Debug, Serialize)]
struct CreateFolderArg<'a> {
    path: &'a str,
    autorename: bool,
}

#[derive(Debug, Serialize)]
struct DeleteArg<'a> {
    path: &'a str,
}

/// Remote store backed by the HTTP API
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: StoreClient,
}

impl HttpRemoteStore {
    /// Creates a new `HttpRemoteStore` wrapping the given [`StoreClient`]
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &StoreClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IRemoteStore for HttpRemoteStore {
    /// Delegates to [`listing::list_folder`], which follows pagination
    async fn list_entries(
        &self,
        token: &AccessToken,
        path: &RemotePath,
        recursive: bool,
    ) -> Result<Vec<Entry>, StoreError> {
        debug!(%path, recursive, "HttpRemoteStore::list_entries");
        listing::list_folder(&self.client, token, path, recursive)
            .await
            .map_err(|e| e.into_store_error(|reason| StoreError::list(path, reason)))
    }

    async fn get_metadata(
        &self,
        token: &AccessToken,
        path: &RemotePath,
    ) -> Result<Entry, StoreError> {
        debug!(%path, "HttpRemoteStore::get_metadata");
        listing::get_metadata(&self.client, token, path)
            .await
            .map_err(|e| e.into_store_error(|reason| StoreError::list(path, reason)))
    }

    async fn create_folder(
        &self,
        token: &AccessToken,
        path: &RemotePath,
    ) -> Result<FolderEntry, StoreError> {
        debug!(%path, "HttpRemoteStore::create_folder");
        let arg = CreateFolderArg {
            path: path.as_str(),
            autorename: false,
        };

        let result: Result<FolderEntry, ApiError> = async {
            let created: MetadataResult = self.client.rpc(token, CREATE_FOLDER, &arg).await?;
            created.metadata.into_folder()
        }
        .await;

        result.map_err(|e| e.into_store_error(|reason| StoreError::create_folder(path, reason)))
    }

    /// Delegates to [`transfer::upload`]
    async fn upload(
        &self,
        token: &AccessToken,
        path: &RemotePath,
        content: ByteStream,
    ) -> Result<FileEntry, StoreError> {
        debug!(%path, "HttpRemoteStore::upload");
        transfer::upload(&self.client, token, path, content)
            .await
            .map_err(|e| e.into_store_error(|reason| StoreError::upload(path, reason)))
    }

    /// Delegates to [`transfer::download`]
    async fn download(
        &self,
        token: &AccessToken,
        path: &RemotePath,
    ) -> Result<Download, StoreError> {
        debug!(%path, "HttpRemoteStore::download");
        transfer::download(&self.client, token, path)
            .await
            .map_err(|e| e.into_store_error(|reason| StoreError::download(path, reason)))
    }

    async fn delete(&self, token: &AccessToken, path: &RemotePath) -> Result<Entry, StoreError> {
        debug!(%path, "HttpRemoteStore::delete");
        let arg = DeleteArg {
            path: path.as_str(),
        };

        let result: Result<Entry, ApiError> = async {
            let deleted: MetadataResult = self.client.rpc(token, DELETE, &arg).await?;
            deleted.metadata.into_entry()
        }
        .await;

        result.map_err(|e| e.into_store_error(|reason| StoreError::delete(path, reason)))
    }

    async fn get_account(&self, token: &AccessToken) -> Result<AccountInfo, StoreError> {
        debug!("HttpRemoteStore::get_account");
        self.client
            .get_current_account(token)
            .await
            .map_err(|e| e.into_store_error(StoreError::Account))
    }
}
