//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! core. Ports are interfaces that the use cases depend on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRemoteStore`] - Primitive operations of the remote file store
//! - [`ILocalSink`] - Local persistence of downloaded bytes

pub mod local_sink;
pub mod remote_store;

pub use local_sink::{copy_stream, CopyError, ILocalSink, LocalHandle};
pub use remote_store::{ByteStream, Download, IRemoteStore};
