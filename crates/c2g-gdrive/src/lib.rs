//! Google Drive access for c2g.
//!
//! This crate provides a sync client for the Drive v3 files API behind a
//! [`DriveApi`] trait, so folder reconciliation can be tested without
//! network access.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DriveApi`] trait with `list_folder()`, `create_folder()`,
//!   `upload_file()` and `delete_file()`
//! - [`DriveClient`] implementation using a bearer access token, following
//!   `nextPageToken` on listings and switching to resumable uploads for
//!   large files
//! - [`UploadMedia`] classification of local files (supported types,
//!   Google Doc conversion, size cap)
//! - [`MockDrive`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use c2g_gdrive::{DriveApi, DriveClient};
//!
//! let drive = DriveClient::from_config("ya29.access-token");
//! for entry in drive.list_folder("root-folder-id")? {
//!     println!("{} {}", entry.name, entry.is_folder());
//! }
//! drive.upload_file(Path::new("exports/Q3.html"), "root-folder-id", "Q3", None)?;
//! ```

mod api;
mod client;
mod error;
mod media;
#[cfg(feature = "mock")]
mod mock;
mod types;

pub use api::DriveApi;
pub use client::DriveClient;
pub use error::DriveError;
pub use media::{
    GOOGLE_DOC_MIME_TYPE, MAX_UPLOAD_BYTES, RESUMABLE_THRESHOLD_BYTES, UploadMedia,
    source_mime_type,
};
#[cfg(feature = "mock")]
pub use mock::MockDrive;
pub use types::{FOLDER_MIME_TYPE, RemoteEntry};
