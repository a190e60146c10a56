//! Folder reconciliation executor.

use std::path::Path;
use std::sync::Arc;

use c2g_gdrive::DriveApi;
use c2g_task::ProgressSink;
use tracing::{error, info};

use crate::error::SyncError;
use crate::local::scan_local;
use crate::options::SyncOptions;
use crate::plan::{SyncAction, plan_level};
use crate::report::SyncReport;

/// Mirrors a local folder tree into a Drive folder.
///
/// Per-file upload and delete failures are reported to the sink, counted
/// and skipped; the run then ends with [`SyncError::Incomplete`]. Listing
/// or creating a folder aborts the run.
pub struct FolderSync {
    drive: Arc<dyn DriveApi>,
    options: SyncOptions,
}

impl FolderSync {
    /// Create a synchronizer.
    #[must_use]
    pub fn new(drive: Arc<dyn DriveApi>, options: SyncOptions) -> Self {
        Self { drive, options }
    }

    /// Reconcile `local` into the Drive folder `remote_folder_id`.
    pub fn sync(
        &self,
        local: &Path,
        remote_folder_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<SyncReport, SyncError> {
        info!(
            "Syncing {} to Drive folder {} ({:?})",
            local.display(),
            remote_folder_id,
            self.options
        );

        let mut report = SyncReport::default();
        self.sync_level(local, Some(remote_folder_id), "", sink, &mut report)?;

        info!("Sync finished: {}", report);
        if report.failures > 0 {
            return Err(SyncError::Incomplete(report));
        }
        Ok(report)
    }

    /// `remote` is `None` under a folder that a dry run would have created.
    fn sync_level(
        &self,
        local: &Path,
        remote: Option<&str>,
        rel: &str,
        sink: &dyn ProgressSink,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let local_entries = scan_local(local)?;
        let remote_entries = match remote {
            Some(id) => self.drive.list_folder(id)?,
            None => Vec::new(),
        };

        let plan = plan_level(&local_entries, &remote_entries, &self.options);
        let dry_run = self.options.dry_run;

        for action in plan.actions {
            match action {
                SyncAction::DeleteOrphan { entry } => {
                    let shown = display_path(rel, &entry.name);
                    if dry_run {
                        sink.send(format!("Would delete '{shown}' from Drive"));
                        report.deleted += 1;
                    } else if self.drive.delete_file(&entry.id) {
                        sink.send(format!("Deleted '{shown}' from Drive"));
                        report.deleted += 1;
                    } else {
                        sink.error(format!("Failed to delete '{shown}' from Drive"));
                        report.failures += 1;
                    }
                }
                SyncAction::EnterFolder {
                    name,
                    path,
                    remote_id,
                } => {
                    let shown = display_path(rel, &name);
                    let folder_id = match (remote_id, remote) {
                        (Some(id), _) => Some(id),
                        (None, Some(parent)) if !dry_run => {
                            let folder = self.drive.create_folder(&name, parent)?;
                            sink.send(format!("Created folder '{shown}'"));
                            report.created_folders += 1;
                            Some(folder.id)
                        }
                        (None, _) => {
                            sink.send(format!("Would create folder '{shown}'"));
                            report.created_folders += 1;
                            None
                        }
                    };
                    self.sync_level(&path, folder_id.as_deref(), &shown, sink, report)?;
                }
                SyncAction::Skip { title } => {
                    sink.send(format!(
                        "Skipped '{}' (already in Drive)",
                        display_path(rel, &title)
                    ));
                    report.skipped += 1;
                }
                SyncAction::Update {
                    title,
                    path,
                    file_id,
                } => {
                    let shown = display_path(rel, &title);
                    let parent = match remote {
                        Some(parent) if !dry_run => parent,
                        _ => {
                            sink.send(format!("Would update '{shown}'"));
                            report.updated += 1;
                            continue;
                        }
                    };
                    match self
                        .drive
                        .upload_file(&path, parent, &title, Some(&file_id))
                    {
                        Ok(_) => {
                            sink.send(format!("Updated '{shown}'"));
                            report.updated += 1;
                        }
                        Err(e) => {
                            error!("Failed to update {}: {}", path.display(), e);
                            sink.error(format!("Failed to update '{shown}': {e}"));
                            report.failures += 1;
                        }
                    }
                }
                SyncAction::Upload { title, path } => {
                    let shown = display_path(rel, &title);
                    let parent = match remote {
                        Some(parent) if !dry_run => parent,
                        _ => {
                            sink.send(format!("Would upload '{shown}'"));
                            report.uploaded += 1;
                            continue;
                        }
                    };
                    match self.drive.upload_file(&path, parent, &title, None) {
                        Ok(_) => {
                            sink.send(format!("Uploaded '{shown}'"));
                            report.uploaded += 1;
                        }
                        Err(e) => {
                            error!("Failed to upload {}: {}", path.display(), e);
                            sink.error(format!("Failed to upload '{shown}': {e}"));
                            report.failures += 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn display_path(rel: &str, name: &str) -> String {
    if rel.is_empty() {
        name.to_owned()
    } else {
        format!("{rel}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use c2g_gdrive::MockDrive;
    use c2g_task::MessageLog;
    use pretty_assertions::assert_eq;

    use super::*;

    /// `A.html` and `B/C.html`.
    fn scenario_dir() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("A.html"), "<p>A</p>").unwrap();
        fs::create_dir(temp.path().join("B")).unwrap();
        fs::write(temp.path().join("B").join("C.html"), "<p>C</p>").unwrap();
        temp
    }

    fn run(
        drive: &Arc<MockDrive>,
        local: &Path,
        options: SyncOptions,
    ) -> (Result<SyncReport, SyncError>, MessageLog) {
        let log = MessageLog::new();
        let sync = FolderSync::new(Arc::clone(drive) as Arc<dyn DriveApi>, options);
        (sync.sync(local, "root", &log), log)
    }

    /// Snapshot of the remote tree as sorted `path:mime` lines.
    fn remote_tree(drive: &MockDrive, folder_id: &str, prefix: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in drive.entries(folder_id) {
            let path = display_path(prefix, &entry.name);
            lines.push(format!("{path}:{}", entry.mime_type));
            if entry.is_folder() {
                lines.extend(remote_tree(drive, &entry.id, &path));
            }
        }
        lines.sort();
        lines
    }

    #[test]
    fn test_uploads_into_empty_remote() {
        let temp = scenario_dir();
        let drive = Arc::new(MockDrive::new());

        let (result, log) = run(&drive, temp.path(), SyncOptions::default());

        let report = result.unwrap();
        assert_eq!(drive.names("root"), vec!["A", "B"]);
        let b = drive.find("root", "B").unwrap();
        assert!(b.is_folder());
        assert_eq!(drive.names(&b.id), vec!["C"]);
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.created_folders, 1);
        assert_eq!(
            log.lines(),
            vec!["Uploaded 'A'", "Created folder 'B'", "Uploaded 'B/C'"]
        );
    }

    #[test]
    fn test_second_run_only_updates() {
        let temp = scenario_dir();
        let drive = Arc::new(MockDrive::new());
        run(&drive, temp.path(), SyncOptions::default()).0.unwrap();
        let before = remote_tree(&drive, "root", "");

        let (result, log) = run(&drive, temp.path(), SyncOptions::default());

        let report = result.unwrap();
        assert_eq!(report.uploaded, 0);
        assert_eq!(report.created_folders, 0);
        assert_eq!(report.updated, 2);
        assert_eq!(log.lines(), vec!["Updated 'A'", "Updated 'B/C'"]);
        assert_eq!(remote_tree(&drive, "root", ""), before);
    }

    #[test]
    fn test_skip_existing_resumes() {
        let temp = scenario_dir();
        let drive = Arc::new(MockDrive::new().with_file("root", "d1", "A"));
        let options = SyncOptions {
            skip_existing: true,
            ..SyncOptions::default()
        };

        let (result, log) = run(&drive, temp.path(), options);

        let report = result.unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.uploaded, 1);
        assert_eq!(log.lines()[0], "Skipped 'A' (already in Drive)");
        assert!(!drive.calls().iter().any(|c| c == "update A"));
    }

    #[test]
    fn test_dry_run_leaves_remote_untouched() {
        let temp = scenario_dir();
        let drive = Arc::new(
            MockDrive::new()
                .with_file("root", "d1", "A")
                .with_file("root", "d2", "Orphan"),
        );
        let before = remote_tree(&drive, "root", "");
        let options = SyncOptions {
            delete_orphans: true,
            dry_run: true,
            ..SyncOptions::default()
        };

        let (result, log) = run(&drive, temp.path(), options);

        result.unwrap();
        assert_eq!(remote_tree(&drive, "root", ""), before);
        assert!(drive.calls().is_empty());
        assert_eq!(
            log.lines(),
            vec![
                "Would delete 'Orphan' from Drive",
                "Would update 'A'",
                "Would create folder 'B'",
                "Would upload 'B/C'"
            ]
        );
    }

    #[test]
    fn test_orphans_deleted_but_folders_kept() {
        let temp = tempfile::tempdir().unwrap();
        let drive = Arc::new(
            MockDrive::new()
                .with_file("root", "d1", "Orphan")
                .with_folder("root", "f1", "KeepMe"),
        );
        let options = SyncOptions {
            delete_orphans: true,
            ..SyncOptions::default()
        };

        let (result, log) = run(&drive, temp.path(), options);

        let report = result.unwrap();
        assert_eq!(report.deleted, 1);
        assert_eq!(drive.names("root"), vec!["KeepMe"]);
        assert_eq!(log.lines(), vec!["Deleted 'Orphan' from Drive"]);
    }

    #[test]
    fn test_failed_orphan_delete_continues_and_reports_incomplete() {
        let temp = scenario_dir();
        let drive = Arc::new(
            MockDrive::new()
                .with_file("root", "d1", "Orphan")
                .with_delete_failure("d1"),
        );
        let options = SyncOptions {
            delete_orphans: true,
            ..SyncOptions::default()
        };

        let (result, log) = run(&drive, temp.path(), options);

        let Err(SyncError::Incomplete(report)) = result else {
            panic!("expected incomplete sync");
        };
        assert_eq!(report.failures, 1);
        assert_eq!(report.deleted, 0);
        assert_eq!(report.uploaded, 2);
        assert_eq!(log.errors(), vec!["Failed to delete 'Orphan' from Drive"]);
        assert_eq!(
            log.lines(),
            vec![
                "Failed to delete 'Orphan' from Drive",
                "Uploaded 'A'",
                "Created folder 'B'",
                "Uploaded 'B/C'"
            ]
        );
        assert_eq!(drive.names("root"), vec!["A", "B", "Orphan"]);
    }

    #[test]
    fn test_dot_named_pages_are_uploaded() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(".NET Guide.html"), "<p>.NET</p>").unwrap();
        fs::write(temp.path().join("A.html"), "<p>A</p>").unwrap();
        let drive = Arc::new(MockDrive::new());

        let (result, log) = run(&drive, temp.path(), SyncOptions::default());

        let report = result.unwrap();
        assert_eq!(report.uploaded, 2);
        assert_eq!(drive.names("root"), vec![".NET Guide", "A"]);
        assert_eq!(log.lines(), vec!["Uploaded '.NET Guide'", "Uploaded 'A'"]);
    }

    #[test]
    fn test_upload_failure_continues_and_reports_incomplete() {
        let temp = scenario_dir();
        let drive = Arc::new(MockDrive::new().with_upload_failure("A"));

        let (result, log) = run(&drive, temp.path(), SyncOptions::default());

        let Err(SyncError::Incomplete(report)) = result else {
            panic!("expected incomplete sync");
        };
        assert_eq!(report.failures, 1);
        assert_eq!(report.uploaded, 1);
        assert_eq!(log.errors().len(), 1);
        assert!(log.errors()[0].starts_with("Failed to upload 'A'"));
        assert!(drive.find("root", "B").is_some());
    }

    #[test]
    fn test_unsupported_file_is_a_failure() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("tool.exe"), "MZ").unwrap();
        let drive = Arc::new(MockDrive::new());

        let (result, _log) = run(&drive, temp.path(), SyncOptions::default());

        assert!(matches!(result, Err(SyncError::Incomplete(r)) if r.failures == 1));
    }

    #[test]
    fn test_missing_local_folder_aborts() {
        let temp = tempfile::tempdir().unwrap();
        let drive = Arc::new(MockDrive::new());

        let (result, _log) = run(&drive, &temp.path().join("missing"), SyncOptions::default());

        assert!(matches!(result, Err(SyncError::Io { .. })));
    }
}
