//! Sync options.

/// Switches for a sync run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Leave remote files that already exist untouched.
    pub skip_existing: bool,
    /// Delete remote files with no local counterpart.
    pub delete_orphans: bool,
    /// Report actions without mutating Drive.
    pub dry_run: bool,
}

/// Options for uploading an export folder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Reconciliation switches.
    pub sync: SyncOptions,
    /// Remove the local export folder after a successful sync.
    pub delete_exports: bool,
}
