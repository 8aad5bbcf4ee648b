//! One-way mirror of a remote subtree onto the local disk
//!
//! `pull` lists the subtree once, creates every folder locally and then
//! downloads every file, one after the other. Nothing is compared with what
//! already exists on disk: existing files are overwritten.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::{AccessToken, RemotePath, StoreError};
use crate::usecases::transfer::TransferEngine;
use crate::usecases::traversal::TraversalEngine;

/// Summary of a completed pull
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MirrorReport {
    pub files_downloaded: u64,
    pub folders_created: u64,
    pub bytes_downloaded: u64,
    /// One message per file or folder that could not be materialized
    pub errors: Vec<String>,
}

impl MirrorReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Use case that materializes a remote subtree under a local directory
#[derive(Clone)]
pub struct MirrorUseCase {
    traversal: TraversalEngine,
    transfer: TransferEngine,
}

impl MirrorUseCase {
    pub fn new(traversal: TraversalEngine, transfer: TransferEngine) -> Self {
        Self {
            traversal,
            transfer,
        }
    }

    /// Downloads everything under `remote_root` into `local_root`
    ///
    /// Per-entry failures are recorded in the report and the pull continues.
    ///
    /// # Errors
    ///
    /// Only a failure to list `remote_root` aborts the pull
    #[instrument(skip(self, token), fields(remote = %remote_root, local = %local_root.display()))]
    pub async fn pull(
        &self,
        token: &AccessToken,
        remote_root: &RemotePath,
        local_root: &Path,
    ) -> Result<MirrorReport, StoreError> {
        let found = self.traversal.find_files_and_dirs(token, remote_root).await?;
        let mut report = MirrorReport::default();

        for folder in &found.folders {
            let target = local_target(local_root, remote_root, &folder.display_path);
            match self.transfer.ensure_local_dir(&target).await {
                Ok(()) => report.folders_created += 1,
                Err(e) => {
                    warn!(folder = %folder.display_path, error = %e, "failed to create local folder");
                    report.errors.push(format!("{}: {e}", folder.display_path));
                }
            }
        }

        for file in &found.files {
            let target = local_target(local_root, remote_root, &file.display_path);
            match self.transfer.download_to_local(token, &target, file).await {
                Ok(outcome) => {
                    report.files_downloaded += 1;
                    report.bytes_downloaded += outcome.bytes_transferred;
                }
                Err(e) => {
                    warn!(file = %file.display_path, error = %e, "failed to download file");
                    report.errors.push(format!("{}: {e}", file.display_path));
                }
            }
        }

        info!(
            files = report.files_downloaded,
            folders = report.folders_created,
            bytes = report.bytes_downloaded,
            errors = report.errors.len(),
            "pull complete"
        );
        Ok(report)
    }
}

/// Maps a remote path under `remote_root` to its location under `local_root`
///
/// The components of `remote_root` are stripped from `display_path`; the
/// remaining ones, in their original case, are appended to `local_root`.
pub fn local_target(local_root: &Path, remote_root: &RemotePath, display_path: &str) -> PathBuf {
    let skip = remote_root.components().count();
    let mut target = local_root.to_path_buf();
    for component in display_path.split('/').filter(|c| !c.is_empty()).skip(skip) {
        target.push(component);
    }
    target
}
