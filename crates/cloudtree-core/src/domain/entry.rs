//! Remote tree entries
//!
//! An [`Entry`] is an immutable snapshot of one node in the remote tree, as
//! returned by a listing call. Entries are never mutated; a fresh listing
//! replaces them.
//!
//! ## Variants
//!
//! - [`FileEntry`] - content-bearing node with size and revision
//! - [`FolderEntry`] - container node, no content attributes
//! - [`OtherEntry`] - any kind the store reports that is neither of the above
//!   (deletion markers, new kinds added by the provider). Classification drops
//!   these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::RemotePath;

// ============================================================================
// FileEntry
// ============================================================================

/// A file in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Lowercase path, unique within the store
    pub path: RemotePath,
    /// Case-preserving path as shown to users
    pub display_path: String,
    /// Display name (last path component)
    pub name: String,
    /// Provider-specific identifier, when the store reports one
    pub id: Option<String>,
    /// Content size in bytes
    pub size: u64,
    /// Revision token identifying this content version
    pub rev: String,
    /// Opaque content hash, when the store reports one
    pub content_hash: Option<String>,
    /// Last modification time on the server
    pub server_modified: Option<DateTime<Utc>>,
}

impl FileEntry {
    /// Build a file entry from its case-preserving path
    ///
    /// The identity path is the lowercase form of `path`; the name and
    /// display path keep the original case.
    pub fn new(path: &RemotePath, size: u64, rev: impl Into<String>) -> Self {
        Self {
            path: path.to_lowercase(),
            display_path: path.to_string(),
            name: path.file_name().unwrap_or_default().to_string(),
            id: None,
            size,
            rev: rev.into(),
            content_hash: None,
            server_modified: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the identity path with the one the store reported
    ///
    /// Stores fold case by their own rules, which need not agree with
    /// [`RemotePath::to_lowercase`] outside ASCII.
    #[must_use]
    pub fn with_identity_path(mut self, path: RemotePath) -> Self {
        self.path = path;
        self
    }

    #[must_use]
    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }

    #[must_use]
    pub fn with_server_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.server_modified = Some(modified);
        self
    }
}

// ============================================================================
// FolderEntry
// ============================================================================

/// A folder in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Lowercase path, unique within the store
    pub path: RemotePath,
    /// Case-preserving path as shown to users
    pub display_path: String,
    /// Display name (last path component)
    pub name: String,
    /// Provider-specific identifier, when the store reports one
    pub id: Option<String>,
}

impl FolderEntry {
    /// Build a folder entry from its case-preserving path
    pub fn new(path: &RemotePath) -> Self {
        Self {
            path: path.to_lowercase(),
            display_path: path.to_string(),
            name: path.file_name().unwrap_or_default().to_string(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the identity path with the one the store reported
    #[must_use]
    pub fn with_identity_path(mut self, path: RemotePath) -> Self {
        self.path = path;
        self
    }
}

// ============================================================================
// OtherEntry
// ============================================================================

/// An entry kind the classifier does not recognize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherEntry {
    /// Kind tag reported by the store (e.g. `"deleted"`)
    pub tag: String,
    /// Lowercase path, if the store reported one
    pub path: Option<RemotePath>,
    /// Display name, if the store reported one
    pub name: Option<String>,
}

impl OtherEntry {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            path: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: &RemotePath) -> Self {
        self.path = Some(path.to_lowercase());
        self.name = path.file_name().map(str::to_string);
        self
    }
}

// ============================================================================
// Entry
// ============================================================================

/// Discriminant of an [`Entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Folder,
    Other,
}

/// One node in the remote tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    File(FileEntry),
    Folder(FolderEntry),
    Other(OtherEntry),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Folder(_) => EntryKind::Folder,
            Entry::Other(_) => EntryKind::Other,
        }
    }

    /// Lowercase identity path (may be absent for `Other` entries)
    pub fn path(&self) -> Option<&RemotePath> {
        match self {
            Entry::File(f) => Some(&f.path),
            Entry::Folder(f) => Some(&f.path),
            Entry::Other(o) => o.path.as_ref(),
        }
    }

    /// Display name (may be absent for `Other` entries)
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::File(f) => Some(&f.name),
            Entry::Folder(f) => Some(&f.name),
            Entry::Other(o) => o.name.as_deref(),
        }
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Entry::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderEntry> {
        match self {
            Entry::Folder(f) => Some(f),
            _ => None,
        }
    }
}

impl From<FileEntry> for Entry {
    fn from(entry: FileEntry) -> Self {
        Entry::File(entry)
    }
}

impl From<FolderEntry> for Entry {
    fn from(entry: FolderEntry) -> Self {
        Entry::Folder(entry)
    }
}

impl From<OtherEntry> for Entry {
    fn from(entry: OtherEntry) -> Self {
        Entry::Other(entry)
    }
}

// ============================================================================
// TraversalRequest
// ============================================================================

/// Parameters of a tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalRequest {
    /// Store-relative path to list; the root is [`RemotePath::root`]
    pub root_path: RemotePath,
    /// Include all descendant levels, not just direct children
    pub recursive: bool,
}

impl TraversalRequest {
    pub fn new(root_path: RemotePath, recursive: bool) -> Self {
        Self {
            root_path,
            recursive,
        }
    }

    /// Request listing only the direct children of `root_path`
    pub fn shallow(root_path: RemotePath) -> Self {
        Self::new(root_path, false)
    }

    /// Request listing every descendant of `root_path`
    pub fn recursive(root_path: RemotePath) -> Self {
        Self::new(root_path, true)
    }
}
