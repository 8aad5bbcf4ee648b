//! CloudTree Core - Traversal, classification and transfer logic
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Entry` (file / folder / other), `RemotePath`, `AccessToken`,
//!   `TransferOutcome`, `AccountInfo`
//! - **Use cases** - `TraversalEngine`, `TransferEngine`, `AccountUseCase`, `MirrorUseCase`
//! - **Port definitions** - Traits for adapters: `IRemoteStore`, `ILocalSink`
//! - **Classification** - `EntryClassifier`, a pure partition of listings
//!
//! # Architecture
//!
//! The domain module contains plain value types with no I/O.
//! Ports define trait interfaces that adapter crates implement
//! (`cloudtree-http` for the remote store, `cloudtree-local` for the disk).
//! Use cases orchestrate domain values through port interfaces and never
//! hold credentials between calls.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
