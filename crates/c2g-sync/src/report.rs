//! Sync run counters.

use std::fmt;

/// What a sync run did, or would do in dry-run mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Remote folders created.
    pub created_folders: usize,
    /// New remote files.
    pub uploaded: usize,
    /// Remote files replaced.
    pub updated: usize,
    /// Existing remote files left alone.
    pub skipped: usize,
    /// Orphaned remote files deleted.
    pub deleted: usize,
    /// Files that failed to upload or delete.
    pub failures: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} folders created, {} uploaded, {} updated, {} skipped, {} deleted, {} failed",
            self.created_folders,
            self.uploaded,
            self.updated,
            self.skipped,
            self.deleted,
            self.failures
        )
    }
}
