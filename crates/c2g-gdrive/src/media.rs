//! Upload media classification.
//!
//! Maps a local file extension to its source MIME type, decides whether
//! Drive should convert it to a Google Doc, and enforces the upload size cap.

use std::path::{Path, PathBuf};

use crate::error::DriveError;

/// Largest file accepted for upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Files larger than this use a resumable upload session (5 MiB).
pub const RESUMABLE_THRESHOLD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME type of a converted Google Doc.
pub const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";

const SUPPORTED_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("html", "text/html"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("rtf", "application/rtf"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

const CONVERTED_TYPES: &[&str] = &["txt", "html", "docx", "xlsx", "pptx", "rtf", "odt"];

/// Source MIME type for a supported extension.
#[must_use]
pub fn source_mime_type(extension: &str) -> Option<&'static str> {
    SUPPORTED_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// A local file validated for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMedia {
    /// Local file path.
    pub path: PathBuf,
    /// MIME type of the uploaded bytes.
    pub source_mime: &'static str,
    /// MIME type Drive should store (Google Doc for converted types).
    pub target_mime: &'static str,
    /// File size in bytes.
    pub size: u64,
}

impl UploadMedia {
    /// Classify a local file.
    ///
    /// Fails with [`DriveError::UnsupportedType`] for extensions outside the
    /// supported table and [`DriveError::SizeLimitExceeded`] above
    /// [`MAX_UPLOAD_BYTES`].
    pub fn from_path(path: &Path) -> Result<Self, DriveError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let source_mime = source_mime_type(extension)
            .ok_or_else(|| DriveError::UnsupportedType(extension.to_owned()))?;
        let target_mime = if CONVERTED_TYPES.contains(&extension) {
            GOOGLE_DOC_MIME_TYPE
        } else {
            source_mime
        };

        let size = std::fs::metadata(path)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(DriveError::SizeLimitExceeded {
                path: path.to_path_buf(),
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            source_mime,
            target_mime,
            size,
        })
    }

    /// Whether the upload needs a resumable session.
    #[must_use]
    pub fn is_resumable(&self) -> bool {
        self.size > RESUMABLE_THRESHOLD_BYTES
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_html_is_converted() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Q3.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let media = UploadMedia::from_path(&path).unwrap();

        assert_eq!(media.source_mime, "text/html");
        assert_eq!(media.target_mime, GOOGLE_DOC_MIME_TYPE);
        assert_eq!(media.size, 9);
        assert!(!media.is_resumable());
    }

    #[test]
    fn test_pdf_keeps_type() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("brief.pdf");
        fs::write(&path, b"%PDF").unwrap();

        let media = UploadMedia::from_path(&path).unwrap();

        assert_eq!(media.target_mime, "application/pdf");
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tool.exe");
        fs::write(&path, b"MZ").unwrap();

        let err = UploadMedia::from_path(&path).unwrap_err();

        assert!(matches!(err, DriveError::UnsupportedType(ext) if ext == "exe"));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = UploadMedia::from_path(Path::new("README")).unwrap_err();
        assert!(matches!(err, DriveError::UnsupportedType(ext) if ext.is_empty()));
    }

    #[test]
    fn test_size_limit() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("big.txt");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_UPLOAD_BYTES + 1).unwrap();

        let err = UploadMedia::from_path(&path).unwrap_err();

        assert!(matches!(err, DriveError::SizeLimitExceeded { .. }));
    }

    #[test]
    fn test_resumable_threshold() {
        let temp = tempfile::tempdir().unwrap();
        let at = temp.path().join("at.txt");
        fs::File::create(&at)
            .unwrap()
            .set_len(RESUMABLE_THRESHOLD_BYTES)
            .unwrap();
        let above = temp.path().join("above.txt");
        fs::File::create(&above)
            .unwrap()
            .set_len(RESUMABLE_THRESHOLD_BYTES + 1)
            .unwrap();

        assert!(!UploadMedia::from_path(&at).unwrap().is_resumable());
        assert!(UploadMedia::from_path(&above).unwrap().is_resumable());
    }
}
