//! Transfer results
//!
//! [`TransferOutcome`] is returned by every upload and download. The replace
//! policy reports its two steps separately through [`ReplaceOutcome`] so that
//! a swallowed delete failure is observable by the caller.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::errors::StoreError;
use super::newtypes::RemotePath;

/// Result of a single upload or download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    /// Bytes moved between the endpoints
    pub bytes_transferred: u64,
    /// Remote path the transfer addressed
    pub remote_path: RemotePath,
    /// Whether the transfer completed
    pub success: bool,
}

impl TransferOutcome {
    pub fn completed(remote_path: RemotePath, bytes_transferred: u64) -> Self {
        Self {
            bytes_transferred,
            remote_path,
            success: true,
        }
    }
}

/// States of the delete-then-create replace policy
///
/// `START -> DELETING -> CREATING -> CREATED | CREATE_FAILED`. The delete
/// result never changes the path taken; only `CreateFailed` is reported as an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceState {
    Start,
    Deleting,
    Creating,
    Created,
    CreateFailed,
}

impl ReplaceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ReplaceState::Created | ReplaceState::CreateFailed)
    }
}

impl Display for ReplaceState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplaceState::Start => "start",
            ReplaceState::Deleting => "deleting",
            ReplaceState::Creating => "creating",
            ReplaceState::Created => "created",
            ReplaceState::CreateFailed => "create_failed",
        };
        f.write_str(name)
    }
}

/// What happened during the best-effort delete step of a replace
#[derive(Debug)]
pub enum DeleteStep {
    /// The previous content was removed
    Deleted,
    /// The delete failed and was ignored (e.g. the path did not exist)
    Skipped(StoreError),
}

impl DeleteStep {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteStep::Deleted)
    }
}

/// Result of a successful replace
#[derive(Debug)]
pub struct ReplaceOutcome {
    /// Outcome of the best-effort delete
    pub delete: DeleteStep,
    /// Outcome of the authoritative create
    pub upload: TransferOutcome,
}
