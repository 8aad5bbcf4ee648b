//! Wire representations of the API's JSON payloads
//!
//! Entries are tagged by a `.tag` field. The tag is missing from payloads
//! whose kind is implied by the endpoint (upload result, download result
//! header, created folder), so the conversions below come in a tagged form
//! ([`WireMetadata::into_entry`]) and two untagged ones.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use cloudtree_core::domain::{
    AccountInfo, Entry, FileEntry, FolderEntry, OtherEntry, RemotePath,
};

use crate::ApiError;

/// Metadata of one entry as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMetadata {
    /// Entry kind: `file`, `folder`, or anything else (e.g. `deleted`)
    #[serde(rename = ".tag", default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Lowercase identity path, folded by the store
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub rev: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub server_modified: Option<DateTime<Utc>>,
}

/// Result wrapper of `create_folder_v2` and `delete_v2`
#[derive(Debug, Deserialize)]
pub(crate) struct MetadataResult {
    pub metadata: WireMetadata,
}

impl WireMetadata {
    fn display_path(&self) -> Result<RemotePath, ApiError> {
        let raw = self
            .path_display
            .as_deref()
            .ok_or_else(|| ApiError::InvalidResponse("entry without path_display".into()))?;
        RemotePath::new(raw).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// The store's own lowercase path, when the payload carries one
    fn identity_path(&self) -> Result<Option<RemotePath>, ApiError> {
        self.path_lower
            .as_deref()
            .map(|raw| RemotePath::new(raw).map_err(|e| ApiError::InvalidResponse(e.to_string())))
            .transpose()
    }

    /// Converts according to the `.tag` field
    pub fn into_entry(self) -> Result<Entry, ApiError> {
        match self.tag.as_deref() {
            Some("file") => self.into_file().map(Entry::File),
            Some("folder") => self.into_folder().map(Entry::Folder),
            Some(tag) => {
                let mut other = OtherEntry::new(tag);
                if let Ok(path) = self.display_path() {
                    other = other.with_path(&path);
                }
                if let Ok(Some(lower)) = self.identity_path() {
                    other.path = Some(lower);
                }
                Ok(Entry::Other(other))
            }
            None => Err(ApiError::InvalidResponse("entry without .tag".into())),
        }
    }

    /// Converts as file metadata regardless of the tag
    pub fn into_file(self) -> Result<FileEntry, ApiError> {
        let path = self.display_path()?;
        let identity = self.identity_path()?;
        let size = self
            .size
            .ok_or_else(|| ApiError::InvalidResponse(format!("file {path} without size")))?;
        let rev = self
            .rev
            .ok_or_else(|| ApiError::InvalidResponse(format!("file {path} without rev")))?;

        let mut file = FileEntry::new(&path, size, rev);
        if let Some(lower) = identity {
            file = file.with_identity_path(lower);
        }
        if let Some(id) = self.id {
            file = file.with_id(id);
        }
        if let Some(hash) = self.content_hash {
            file = file.with_content_hash(hash);
        }
        if let Some(modified) = self.server_modified {
            file = file.with_server_modified(modified);
        }
        Ok(file)
    }

    /// Converts as folder metadata regardless of the tag
    pub fn into_folder(self) -> Result<FolderEntry, ApiError> {
        let path = self.display_path()?;
        let mut folder = FolderEntry::new(&path);
        if let Some(lower) = self.identity_path()? {
            folder = folder.with_identity_path(lower);
        }
        if let Some(id) = self.id {
            folder = folder.with_id(id);
        }
        Ok(folder)
    }
}

/// Response of `users/get_current_account`
#[derive(Debug, Deserialize)]
pub(crate) struct WireAccount {
    pub account_id: String,
    pub name: WireAccountName,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireAccountName {
    pub display_name: String,
}

impl From<WireAccount> for AccountInfo {
    fn from(account: WireAccount) -> Self {
        AccountInfo {
            account_id: account.account_id,
            display_name: account.name.display_name,
            email: account.email,
            email_verified: account.email_verified,
            country: account.country,
        }
    }
}
