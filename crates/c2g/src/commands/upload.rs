//! `c2g upload` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use c2g_config::{CliSettings, Config};
use c2g_gdrive::{DriveApi, DriveClient};
use c2g_sync::{SyncError, SyncOptions, UploadOptions, upload_exports};
use c2g_task::{ProgressSink, TaskRunner};
use clap::Args;

use crate::commands::follow_task;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the upload command.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Export profile to upload (overrides config).
    #[arg(long)]
    profile: Option<String>,

    /// Target Drive folder ID (overrides config).
    #[arg(long)]
    folder_id: Option<String>,

    /// Report what would change without modifying Drive.
    #[arg(long)]
    dry_run: bool,

    /// Leave files that already exist in Drive untouched.
    #[arg(long)]
    skip_existing: bool,

    /// Delete Drive files that have no exported counterpart.
    #[arg(long)]
    delete_orphans: bool,

    /// Delete the local export folder after a successful upload.
    #[arg(long)]
    delete_exports: bool,
}

impl UploadArgs {
    /// Execute the upload command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            profile: self.profile.clone(),
            folder_id: self.folder_id.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let gdrive = config.require_gdrive()?;

        let export_dir = config.export_resolved.export_dir();
        if !export_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "export folder {} does not exist, run `c2g export` first",
                export_dir.display()
            )));
        }

        let drive: Arc<dyn DriveApi> = Arc::new(DriveClient::from_config(&gdrive.access_token));
        run_upload(
            drive,
            export_dir,
            gdrive.folder_id.clone(),
            self.options(),
            &output,
        )
    }

    fn options(&self) -> UploadOptions {
        UploadOptions {
            sync: SyncOptions {
                skip_existing: self.skip_existing,
                delete_orphans: self.delete_orphans,
                dry_run: self.dry_run,
            },
            delete_exports: self.delete_exports,
        }
    }
}

/// Sync `export_dir` into `folder_id` on a background task.
fn run_upload(
    drive: Arc<dyn DriveApi>,
    export_dir: PathBuf,
    folder_id: String,
    options: UploadOptions,
    output: &Output,
) -> Result<(), CliError> {
    if options.sync.dry_run {
        output.highlight("[DRY RUN] Google Drive will not be modified.");
    }
    output.highlight(&format!(
        "Uploading {} to Drive folder {}",
        export_dir.display(),
        folder_id
    ));

    let mut runner = TaskRunner::new("Uploader");
    runner.start(move |sink| {
        let report = upload_exports(drive, &export_dir, &folder_id, options, sink)?;
        sink.send(report.to_string());
        Ok::<_, SyncError>(())
    })?;
    follow_task(&mut runner, output)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use c2g_confluence::MockConfluence;
    use c2g_gdrive::MockDrive;
    use c2g_tree::{ExportOptions, TreeBuilder};
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::export::run_export;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        upload: UploadArgs,
    }

    fn export_dir() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("Product.html"), "<h1>Product</h1>").unwrap();
        fs::create_dir(temp.path().join("Product")).unwrap();
        fs::write(temp.path().join("Product").join("Roadmap.html"), "<p>").unwrap();
        temp
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = TestCli::try_parse_from(["c2g", "--dry-run", "--delete-orphans"]).unwrap();

        assert_eq!(
            cli.upload.options(),
            UploadOptions {
                sync: SyncOptions {
                    skip_existing: false,
                    delete_orphans: true,
                    dry_run: true,
                },
                delete_exports: false,
            }
        );
    }

    #[test]
    fn test_run_upload_mirrors_folder() {
        let temp = export_dir();
        let drive = Arc::new(MockDrive::new());

        run_upload(
            Arc::clone(&drive) as Arc<dyn DriveApi>,
            temp.path().to_path_buf(),
            "root".to_owned(),
            UploadOptions::default(),
            &Output::new(),
        )
        .unwrap();

        assert_eq!(drive.names("root"), vec!["Product", "Product"]);
        assert_eq!(drive.calls().len(), 3);
    }

    #[test]
    fn test_run_upload_failure_fails_command() {
        let temp = export_dir();
        let drive = Arc::new(MockDrive::new().with_upload_failure("Roadmap"));

        let result = run_upload(
            drive,
            temp.path().to_path_buf(),
            "root".to_owned(),
            UploadOptions::default(),
            &Output::new(),
        );

        assert!(matches!(result, Err(CliError::TaskFailed(name)) if name == "Uploader"));
    }

    #[test]
    fn test_exported_dot_titles_reach_drive() {
        let site = Arc::new(
            MockConfluence::new()
                .with_root("NL", "1", "Product", "2024-08-01T00:00:00Z")
                .with_child("1", "2", ".NET Guide", "2024-09-01T00:00:00Z")
                .with_child("2", "3", "Runtime", "2024-07-15T00:00:00Z")
                .with_child("1", "4", "..", "2023-01-01T00:00:00Z"),
        );
        let tree = TreeBuilder::new(Arc::clone(&site) as Arc<dyn c2g_confluence::ConfluenceApi>)
            .build("NL", "Product")
            .unwrap();
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("export");
        run_export(site, tree, dest.clone(), ExportOptions { clean: true }, &Output::new())
            .unwrap();
        let drive = Arc::new(MockDrive::new());

        run_upload(
            Arc::clone(&drive) as Arc<dyn DriveApi>,
            dest,
            "root".to_owned(),
            UploadOptions::default(),
            &Output::new(),
        )
        .unwrap();

        let product = drive
            .entries("root")
            .into_iter()
            .find(|e| e.is_folder())
            .unwrap();
        assert_eq!(drive.names(&product.id), vec![".NET Guide", ".NET Guide", "4"]);
        let guide = drive
            .entries(&product.id)
            .into_iter()
            .find(|e| e.is_folder())
            .unwrap();
        assert_eq!(drive.names(&guide.id), vec!["Runtime"]);
    }
}
