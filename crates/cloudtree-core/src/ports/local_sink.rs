//! Local sink port (driven/secondary port)
//!
//! This module defines the minimal local-filesystem contract needed to
//! materialize downloads: create a writable handle (creating missing parent
//! directories first), copy a stream into it, and create directories.
//!
//! ## Design Notes
//!
//! - [`LocalHandle`] is an owned writer. Dropping it releases the underlying
//!   file handle, so every exit path of a caller releases it.
//! - [`copy_stream`] tells read failures (the remote stream broke) apart from
//!   write failures (the local disk refused the bytes) so callers can report
//!   the right error.
//! - Concurrent writers to the same path are not serialized here.

use std::path::Path;
use std::pin::Pin;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::StoreError;
use crate::ports::remote_store::ByteStream;

/// Writable handle to a local file
pub type LocalHandle = Pin<Box<dyn AsyncWrite + Send>>;

/// Size of the buffer used by [`copy_stream`]
const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Failure of a stream copy, split by side
#[derive(Debug, Error)]
pub enum CopyError {
    /// Reading from the source stream failed
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Writing to the destination handle failed
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Copies `source` into `destination` until end of stream
///
/// The destination is flushed before returning.
///
/// # Returns
/// Number of bytes written
pub async fn copy_stream(
    source: &mut ByteStream,
    destination: &mut LocalHandle,
) -> Result<u64, CopyError> {
    let mut buf = vec![0u8; COPY_CHUNK_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = source.read(&mut buf).await.map_err(CopyError::Read)?;
        if n == 0 {
            break;
        }
        destination
            .write_all(&buf[..n])
            .await
            .map_err(CopyError::Write)?;
        written += n as u64;
    }

    destination.flush().await.map_err(CopyError::Write)?;
    Ok(written)
}

/// Port trait for local persistence of downloaded content
#[async_trait::async_trait]
pub trait ILocalSink: Send + Sync {
    /// Opens `path` for writing, creating missing parent directories first
    ///
    /// An existing file is truncated.
    ///
    /// # Errors
    /// `StoreError::LocalWrite` if a directory or the file cannot be created
    async fn create_with_parents(&self, path: &Path) -> Result<LocalHandle, StoreError>;

    /// Creates `path` and all missing parents as directories
    ///
    /// # Errors
    /// `StoreError::LocalWrite` if a directory cannot be created
    async fn ensure_dir(&self, path: &Path) -> Result<(), StoreError>;

    /// Copies `source` into `destination`
    ///
    /// The default implementation delegates to [`copy_stream`].
    async fn copy(
        &self,
        source: &mut ByteStream,
        destination: &mut LocalHandle,
    ) -> Result<u64, CopyError> {
        copy_stream(source, destination).await
    }
}
