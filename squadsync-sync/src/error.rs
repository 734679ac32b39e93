//! Error types for squadsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use squadsync_client::ClientError;
use squadsync_core::RosterError;

/// Fatal conditions of a reconciliation pass. Per-member mutation failures
/// are not errors; they are recorded in the report.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote roster could not be fetched.
    #[error("failed to fetch remote roster: {0}")]
    Fetch(#[from] ClientError),

    /// The remote roster was fetched but does not follow the expected layout.
    #[error("remote roster payload is malformed: {0}")]
    Payload(#[source] RosterError),

    /// The local roster could not be read or parsed.
    #[error("local roster error: {0}")]
    Roster(#[from] RosterError),

    /// The local roster parsed but has no members; it is ground truth and
    /// would otherwise wipe the remote squad.
    #[error("local roster {path} has no members; refusing to reconcile against an empty list")]
    EmptyRoster { path: PathBuf },
}
