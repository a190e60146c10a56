//! Drive collaborator trait.

use std::path::Path;

use crate::client::DriveClient;
use crate::error::DriveError;
use crate::types::RemoteEntry;

/// Operations the folder synchronizer needs from Google Drive.
pub trait DriveApi: Send + Sync {
    /// List the non-trashed entries directly inside a folder.
    fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>, DriveError>;

    /// Create a folder named `name` under `parent_id`.
    fn create_folder(&self, name: &str, parent_id: &str) -> Result<RemoteEntry, DriveError>;

    /// Upload `local_path` as `target_name`, replacing `existing_id` when given.
    fn upload_file(
        &self,
        local_path: &Path,
        parent_id: &str,
        target_name: &str,
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError>;

    /// Delete a file. Returns `false` (after logging) if Drive refused.
    fn delete_file(&self, file_id: &str) -> bool;
}

impl DriveApi for DriveClient {
    fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>, DriveError> {
        DriveClient::list_folder(self, folder_id)
    }

    fn create_folder(&self, name: &str, parent_id: &str) -> Result<RemoteEntry, DriveError> {
        DriveClient::create_folder(self, name, parent_id)
    }

    fn upload_file(
        &self,
        local_path: &Path,
        parent_id: &str,
        target_name: &str,
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError> {
        DriveClient::upload_file(self, local_path, parent_id, target_name, existing_id)
    }

    fn delete_file(&self, file_id: &str) -> bool {
        DriveClient::delete_file(self, file_id)
    }
}
