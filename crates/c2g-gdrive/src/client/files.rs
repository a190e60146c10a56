//! Folder listing, folder creation and deletion.

use tracing::{debug, info, warn};

use super::{DriveClient, ENTRY_FIELDS, check_status};
use crate::error::DriveError;
use crate::types::{FOLDER_MIME_TYPE, FileList, RemoteEntry};

/// Page size for folder listings.
const LIST_PAGE_SIZE: usize = 100;

/// Query selecting the non-trashed direct children of a folder.
pub(super) fn children_query(folder_id: &str) -> String {
    format!("'{}' in parents and trashed=false", folder_id.replace('\'', "\\'"))
}

impl DriveClient {
    /// List every non-trashed entry directly inside a folder.
    pub(crate) fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>, DriveError> {
        info!("Listing Drive folder {}", folder_id);

        let url = Self::files_url();
        let query = children_query(folder_id);
        let fields = format!("nextPageToken,files({ENTRY_FIELDS})");
        let page_size = LIST_PAGE_SIZE.to_string();

        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .agent
                .get(&url)
                .header("Authorization", &self.auth_header)
                .header("Accept", "application/json")
                .query("q", &query)
                .query("fields", &fields)
                .query("pageSize", &page_size);
            if let Some(token) = &page_token {
                request = request.query("pageToken", token);
            }

            let mut body = check_status(request.call()?)?;
            let page: FileList = body.read_json()?;
            entries.extend(page.files);
            debug!("Got {} entries from folder {}", entries.len(), folder_id);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => return Ok(entries),
            }
        }
    }

    /// Create a folder under `parent_id`.
    pub(crate) fn create_folder(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<RemoteEntry, DriveError> {
        info!("Creating Drive folder '{}' in {}", name, parent_id);

        let payload = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });
        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .post(&Self::files_url())
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .query("fields", ENTRY_FIELDS)
            .send(&payload_bytes[..])?;

        let folder: RemoteEntry = check_status(response)?.read_json()?;
        info!("Created folder '{}' (id={})", folder.name, folder.id);
        Ok(folder)
    }

    /// Delete a file, logging instead of failing on remote errors.
    pub(crate) fn delete_file(&self, file_id: &str) -> bool {
        let url = format!("{}/{}", Self::files_url(), file_id);
        let result = self
            .agent
            .delete(&url)
            .header("Authorization", &self.auth_header)
            .call()
            .map_err(DriveError::from)
            .and_then(check_status);

        match result {
            Ok(_) => {
                info!("Deleted {} from Drive", file_id);
                true
            }
            Err(e) => {
                warn!("Error deleting {} from Drive: {}", file_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_children_query() {
        assert_eq!(
            children_query("abc123"),
            "'abc123' in parents and trashed=false"
        );
    }

    #[test]
    fn test_children_query_escapes_quote() {
        assert_eq!(children_query("a'b"), "'a\\'b' in parents and trashed=false");
    }
}
