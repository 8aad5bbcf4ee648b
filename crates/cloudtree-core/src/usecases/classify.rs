//! Entry classification
//!
//! Partitions a flat listing into files and folders. Entries of any other
//! kind are skipped; the number skipped is part of the result rather than a
//! side effect.

use tracing::trace;

use crate::domain::{Entry, FileEntry, FolderEntry};

/// Files and folders found in a listing, in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub files: Vec<FileEntry>,
    pub folders: Vec<FolderEntry>,
    /// Number of entries that were neither files nor folders
    pub skipped: usize,
}

impl Classified {
    /// Total number of classified entries (files and folders)
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}

/// Pure partition of entries into files and folders
pub struct EntryClassifier;

impl EntryClassifier {
    /// Classifies `entries`
    ///
    /// Relative order is preserved within `files` and within `folders`.
    /// `Other` entries are dropped and counted in `skipped`. Never fails.
    pub fn classify(entries: impl IntoIterator<Item = Entry>) -> Classified {
        let mut classified = Classified::default();

        for entry in entries {
            match entry {
                Entry::File(file) => classified.files.push(file),
                Entry::Folder(folder) => classified.folders.push(folder),
                Entry::Other(other) => {
                    trace!(tag = %other.tag, "skipping unrecognized entry kind");
                    classified.skipped += 1;
                }
            }
        }

        classified
    }
}
