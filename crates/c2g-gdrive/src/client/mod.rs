//! Google Drive v3 REST client.
//!
//! Provides a sync HTTP client for the Drive files API authenticated with
//! an OAuth bearer access token supplied by configuration.

mod files;
mod upload;

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::DriveError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 60;

/// Drive metadata API base URL.
const API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Drive media upload base URL.
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Fields requested for every returned file resource.
const ENTRY_FIELDS: &str = "id,name,mimeType";

/// Google Drive REST API client.
pub struct DriveClient {
    agent: Agent,
    auth_header: String,
}

impl DriveClient {
    /// Create client from an OAuth access token.
    #[must_use]
    pub fn from_config(access_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            auth_header: format!("Bearer {access_token}"),
        }
    }

    fn files_url() -> String {
        format!("{API_BASE}/files")
    }

    fn upload_url() -> String {
        format!("{UPLOAD_BASE}/files")
    }
}

/// Map an error status to [`DriveError::HttpResponse`] and hand back the body.
fn check_status(response: Response<ureq::Body>) -> Result<ureq::Body, DriveError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(DriveError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader)
}
