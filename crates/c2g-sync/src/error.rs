//! Error types for folder synchronization.

use std::path::PathBuf;

use c2g_gdrive::DriveError;

use crate::report::SyncReport;

/// Error from a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Listing a remote folder or creating one failed.
    #[error(transparent)]
    Drive(#[from] DriveError),

    /// Reading the local folder or removing exports failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// Local path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The walk finished but some files could not be synced.
    #[error("{} of the files failed to sync", .0.failures)]
    Incomplete(SyncReport),
}
