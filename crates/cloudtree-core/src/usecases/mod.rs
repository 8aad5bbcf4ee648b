//! Use cases (interactors) for CloudTree
//!
//! This module contains the engines that orchestrate domain values and port
//! interfaces. They are thin coordinators: classification is a pure
//! function, and all I/O goes through [`IRemoteStore`](crate::ports::IRemoteStore)
//! and [`ILocalSink`](crate::ports::ILocalSink).
//!
//! ## Use Cases
//!
//! - [`EntryClassifier`] - Partition a listing into files and folders
//! - [`TraversalEngine`] - Root listing, tree listing, files-and-folders discovery
//! - [`TransferEngine`] - Upload, download (stream / disk / memory), replace, remove
//! - [`AccountUseCase`] - Identity of the token's owner
//! - [`MirrorUseCase`] - One-way materialization of a remote subtree on disk

pub mod account;
pub mod classify;
pub mod mirror;
pub mod transfer;
pub mod traversal;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::AccountUseCase;
pub use classify::{Classified, EntryClassifier};
pub use mirror::{MirrorReport, MirrorUseCase};
pub use transfer::TransferEngine;
pub use traversal::TraversalEngine;
