//! Upload of an export folder, with optional cleanup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use c2g_gdrive::DriveApi;
use c2g_task::ProgressSink;
use tracing::info;

use crate::error::SyncError;
use crate::options::UploadOptions;
use crate::report::SyncReport;
use crate::sync::FolderSync;

/// Sync `export_dir` into `folder_id`, then optionally delete `export_dir`.
///
/// The export folder is only removed after a complete, non-dry-run sync;
/// the deletion message is emitted in dry-run mode too.
pub fn upload_exports(
    drive: Arc<dyn DriveApi>,
    export_dir: &Path,
    folder_id: &str,
    options: UploadOptions,
    sink: &dyn ProgressSink,
) -> Result<SyncReport, SyncError> {
    let report = FolderSync::new(drive, options.sync).sync(export_dir, folder_id, sink)?;

    if options.delete_exports {
        if !options.sync.dry_run {
            info!("Removing export folder {}", export_dir.display());
            fs::remove_dir_all(export_dir).map_err(|source| SyncError::Io {
                path: export_dir.to_path_buf(),
                source,
            })?;
        }
        sink.send(format!(
            "Delete exported HTML files: {}",
            export_dir.display()
        ));
    }

    Ok(report)
}
