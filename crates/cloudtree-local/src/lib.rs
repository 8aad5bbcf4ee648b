//! CloudTree Local - local filesystem sink
//!
//! Implements [`ILocalSink`] using `tokio::fs` for async file operations.
//!
//! ## Design Decisions
//!
//! - **Direct writes**: downloads are written straight to the target path.
//!   An interrupted download leaves a truncated file behind; callers get the
//!   error and decide whether to retry or remove it.
//! - **Truncation**: opening an existing file truncates it, so a repeated
//!   pull overwrites instead of appending.
//! - **Handle release**: the returned handle owns the `tokio::fs::File`;
//!   dropping it closes the descriptor.

use std::path::Path;

use cloudtree_core::domain::StoreError;
use cloudtree_core::ports::{ILocalSink, LocalHandle};
use tracing::{debug, instrument};

/// Adapter that bridges the [`ILocalSink`] port to the real filesystem.
///
/// This is a zero-sized struct because all operations derive their context
/// from the path arguments.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSink;

impl LocalFileSink {
    /// Create a new `LocalFileSink`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ILocalSink for LocalFileSink {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn create_with_parents(&self, path: &Path) -> Result<LocalHandle, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::local_write(parent, e))?;
        }

        let file = tokio::fs::File::create(path)
            .await
            .map_err(|e| StoreError::local_write(path, e))?;

        debug!("opened local file for writing");
        Ok(Box::pin(file))
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    async fn ensure_dir(&self, path: &Path) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| StoreError::local_write(path, e))?;
        debug!("directory ready");
        Ok(())
    }
}
