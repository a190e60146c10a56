//! Mock Drive implementation for testing.
//!
//! Provides [`MockDrive`], an in-memory folder tree that records every
//! mutating call.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::DriveApi;
use crate::error::DriveError;
use crate::media::{GOOGLE_DOC_MIME_TYPE, UploadMedia};
use crate::types::{FOLDER_MIME_TYPE, RemoteEntry};

/// Mock Drive for testing.
///
/// Folders are keyed by ID; listing an unknown folder returns nothing.
/// Uploads validate the local file the same way [`crate::DriveClient`]
/// does, so unsupported types and oversized files fail here too.
///
/// # Example
///
/// ```ignore
/// use c2g_gdrive::{DriveApi, MockDrive};
///
/// let drive = MockDrive::new()
///     .with_folder("root", "f1", "Roadmap")
///     .with_file("f1", "d1", "Q3");
///
/// assert_eq!(drive.names("f1"), vec!["Q3"]);
/// ```
#[derive(Debug, Default)]
pub struct MockDrive {
    folders: RwLock<HashMap<String, Vec<RemoteEntry>>>,
    next_id: AtomicU64,
    failing_uploads: RwLock<HashSet<String>>,
    failing_deletes: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockDrive {
    /// Create a new empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder entry under `parent_id`.
    #[must_use]
    pub fn with_folder(self, parent_id: &str, id: &str, name: &str) -> Self {
        self.insert(parent_id, id, name, FOLDER_MIME_TYPE);
        self.folders.write().unwrap().entry(id.to_owned()).or_default();
        self
    }

    /// Add a converted document under `parent_id`.
    #[must_use]
    pub fn with_file(self, parent_id: &str, id: &str, name: &str) -> Self {
        self.insert(parent_id, id, name, GOOGLE_DOC_MIME_TYPE);
        self
    }

    /// Make uploads targeting `name` fail with an HTTP 500.
    #[must_use]
    pub fn with_upload_failure(self, name: &str) -> Self {
        self.failing_uploads.write().unwrap().insert(name.to_owned());
        self
    }

    /// Make deleting `file_id` fail.
    #[must_use]
    pub fn with_delete_failure(self, file_id: &str) -> Self {
        self.failing_deletes
            .write()
            .unwrap()
            .insert(file_id.to_owned());
        self
    }

    /// Mutating calls as `"<operation> <name or id>"`, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Entries currently inside a folder.
    #[must_use]
    pub fn entries(&self, folder_id: &str) -> Vec<RemoteEntry> {
        self.folders
            .read()
            .unwrap()
            .get(folder_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Sorted names of the entries inside a folder.
    #[must_use]
    pub fn names(&self, folder_id: &str) -> Vec<String> {
        let mut names: Vec<_> = self
            .entries(folder_id)
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        names
    }

    /// Find an entry by name inside a folder.
    #[must_use]
    pub fn find(&self, folder_id: &str, name: &str) -> Option<RemoteEntry> {
        self.entries(folder_id).into_iter().find(|e| e.name == name)
    }

    fn insert(&self, parent_id: &str, id: &str, name: &str, mime_type: &str) -> RemoteEntry {
        let entry = RemoteEntry {
            id: id.to_owned(),
            name: name.to_owned(),
            mime_type: mime_type.to_owned(),
        };
        self.folders
            .write()
            .unwrap()
            .entry(parent_id.to_owned())
            .or_default()
            .push(entry.clone());
        entry
    }

    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n}")
    }

    fn record(&self, call: String) {
        self.calls.write().unwrap().push(call);
    }
}

impl DriveApi for MockDrive {
    fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>, DriveError> {
        Ok(self.entries(folder_id))
    }

    fn create_folder(&self, name: &str, parent_id: &str) -> Result<RemoteEntry, DriveError> {
        self.record(format!("create_folder {name}"));
        let id = self.generate_id("folder");
        let entry = self.insert(parent_id, &id, name, FOLDER_MIME_TYPE);
        self.folders.write().unwrap().entry(id).or_default();
        Ok(entry)
    }

    fn upload_file(
        &self,
        local_path: &Path,
        parent_id: &str,
        target_name: &str,
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError> {
        let media = UploadMedia::from_path(local_path)?;
        let operation = if existing_id.is_some() {
            "update"
        } else {
            "upload"
        };
        self.record(format!("{operation} {target_name}"));

        if self.failing_uploads.read().unwrap().contains(target_name) {
            return Err(DriveError::HttpResponse {
                status: 500,
                body: format!("mock failure for {target_name}"),
            });
        }

        match existing_id {
            Some(id) => self
                .find(parent_id, target_name)
                .filter(|e| e.id == id)
                .ok_or_else(|| DriveError::HttpResponse {
                    status: 404,
                    body: format!("file {id} not found"),
                }),
            None => {
                let id = self.generate_id("file");
                Ok(self.insert(parent_id, &id, target_name, media.target_mime))
            }
        }
    }

    fn delete_file(&self, file_id: &str) -> bool {
        self.record(format!("delete {file_id}"));
        if self.failing_deletes.read().unwrap().contains(file_id) {
            return false;
        }
        let mut folders = self.folders.write().unwrap();
        let mut removed = false;
        for entries in folders.values_mut() {
            let before = entries.len();
            entries.retain(|e| e.id != file_id);
            removed |= entries.len() != before;
        }
        removed
    }
}
