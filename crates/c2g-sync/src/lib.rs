//! Google Drive folder reconciliation for c2g.
//!
//! Mirrors a local export folder into a Drive folder: subfolders are
//! reused or created, exported pages are uploaded or updated, and remote
//! files without a local counterpart can be deleted. Dry-run mode reports
//! the same actions without mutating Drive.
//!
//! Planning ([`plan_level`]) is separate from execution ([`FolderSync`]),
//! so the decision for a folder level can be tested from plain listings.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use c2g_sync::{FolderSync, SyncOptions};
//! use c2g_task::TracingSink;
//!
//! let sync = FolderSync::new(drive, SyncOptions { dry_run: true, ..Default::default() });
//! let report = sync.sync(Path::new("exports/default"), "folder-id", &TracingSink)?;
//! println!("{report}");
//! ```

mod error;
mod local;
mod options;
mod plan;
mod report;
mod sync;
mod upload;

pub use error::SyncError;
pub use local::{EXPORT_SUFFIX, LocalEntry, LocalKind, scan_local};
pub use options::{SyncOptions, UploadOptions};
pub use plan::{LevelPlan, SyncAction, plan_level};
pub use report::SyncReport;
pub use sync::FolderSync;
pub use upload::upload_exports;
