//! Error types for Google Drive integration.

use std::path::PathBuf;

/// Error from Google Drive API operations.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// File extension is not in the supported upload table.
    #[error("unsupported file type: {0:?}")]
    UnsupportedType(String),

    /// File is larger than the upload cap.
    #[error("{} is {size} bytes, exceeding the {limit} byte upload limit", path.display())]
    SizeLimitExceeded {
        /// Local file path.
        path: PathBuf,
        /// File size in bytes.
        size: u64,
        /// Upload limit in bytes.
        limit: u64,
    },

    /// Response missed data the protocol requires.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_size_limit_message() {
        let err = DriveError::SizeLimitExceeded {
            path: PathBuf::from("big.pdf"),
            size: 11,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "big.pdf is 11 bytes, exceeding the 10 byte upload limit"
        );
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = DriveError::UnsupportedType("exe".to_owned());
        assert_eq!(err.to_string(), "unsupported file type: \"exe\"");
    }
}
