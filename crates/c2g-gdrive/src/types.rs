//! Google Drive API types.

use serde::{Deserialize, Serialize};

/// MIME type Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// File or folder inside a Drive folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    /// Drive file ID.
    pub id: String,
    /// Display name (no extension for converted documents).
    pub name: String,
    /// MIME type; [`FOLDER_MIME_TYPE`] for folders.
    pub mime_type: String,
}

impl RemoteEntry {
    /// Whether this entry is a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// Whether the name starts with a dot.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Response of `files.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<RemoteEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_list_deserialize() {
        let json = r#"{
            "nextPageToken": "abc",
            "files": [
                {"id": "1", "name": "Roadmap", "mimeType": "application/vnd.google-apps.folder"},
                {"id": "2", "name": "Q3", "mimeType": "application/vnd.google-apps.document"}
            ]
        }"#;
        let list: FileList = serde_json::from_str(json).unwrap();

        assert_eq!(list.next_page_token.as_deref(), Some("abc"));
        assert!(list.files[0].is_folder());
        assert!(!list.files[1].is_folder());
    }

    #[test]
    fn test_file_list_last_page() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn test_hidden_entry() {
        let entry = RemoteEntry {
            id: "1".to_owned(),
            name: ".keep".to_owned(),
            mime_type: "text/plain".to_owned(),
        };
        assert!(entry.is_hidden());
    }
}
