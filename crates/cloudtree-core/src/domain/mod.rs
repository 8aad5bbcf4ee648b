//! Domain types and business rules
//!
//! This module contains the core value types for CloudTree:
//! - Newtypes for validated remote paths and opaque credentials
//! - Remote tree entries and their file / folder / other variants
//! - Account identity returned by the remote store
//! - Transfer results
//! - Domain and operation error types

pub mod account;
pub mod entry;
pub mod errors;
pub mod newtypes;
pub mod transfer;

// Re-export commonly used types
pub use account::AccountInfo;
pub use entry::{Entry, EntryKind, FileEntry, FolderEntry, OtherEntry, TraversalRequest};
pub use errors::{DomainError, StoreError};
pub use newtypes::{AccessToken, RemotePath};
pub use transfer::{DeleteStep, ReplaceOutcome, ReplaceState, TransferOutcome};
