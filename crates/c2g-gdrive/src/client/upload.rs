//! Media upload for Drive API.
//!
//! Small files go up in one `multipart/related` request; files above the
//! resumable threshold open an upload session and send the bytes to it.

use std::path::Path;

use rand::RngExt;
use tracing::info;
use ureq::RequestBuilder;
use ureq::typestate::WithBody;

use super::{DriveClient, ENTRY_FIELDS, check_status};
use crate::error::DriveError;
use crate::media::UploadMedia;
use crate::types::RemoteEntry;

impl DriveClient {
    /// Upload a local file as `target_name` into `parent_id`.
    ///
    /// With `existing_id` the file's content is replaced in place; otherwise
    /// a new file is created. Convertible types are stored as Google Docs.
    pub(crate) fn upload_file(
        &self,
        local_path: &Path,
        parent_id: &str,
        target_name: &str,
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError> {
        let media = UploadMedia::from_path(local_path)?;
        let data = std::fs::read(local_path)?;
        let metadata = upload_metadata(&media, parent_id, target_name, existing_id);

        match existing_id {
            Some(id) => info!("Updating '{}' (id={}) in Drive", target_name, id),
            None => info!("Uploading '{}' to Drive folder {}", target_name, parent_id),
        }

        let entry = if media.is_resumable() {
            info!("Resumable upload for {}", local_path.display());
            self.upload_resumable(&media, &metadata, &data, existing_id)?
        } else {
            self.upload_multipart(&media, &metadata, &data, existing_id)?
        };

        info!("Upload of '{}' complete (id={})", entry.name, entry.id);
        Ok(entry)
    }

    fn upload_request(
        &self,
        existing_id: Option<&str>,
        upload_type: &str,
    ) -> RequestBuilder<WithBody> {
        let request = match existing_id {
            Some(id) => self.agent.patch(&format!("{}/{}", Self::upload_url(), id)),
            None => self.agent.post(&Self::upload_url()),
        };
        request
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .query("uploadType", upload_type)
            .query("fields", ENTRY_FIELDS)
            .query("useContentAsIndexableText", "true")
    }

    fn upload_multipart(
        &self,
        media: &UploadMedia,
        metadata: &serde_json::Value,
        data: &[u8],
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError> {
        let boundary = format!("----C2gUploadBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_related_body(&boundary, metadata, media.source_mime, data)?;

        let response = self
            .upload_request(existing_id, "multipart")
            .header(
                "Content-Type",
                &format!("multipart/related; boundary={boundary}"),
            )
            .send(&body[..])?;

        Ok(check_status(response)?.read_json()?)
    }

    fn upload_resumable(
        &self,
        media: &UploadMedia,
        metadata: &serde_json::Value,
        data: &[u8],
        existing_id: Option<&str>,
    ) -> Result<RemoteEntry, DriveError> {
        let payload_bytes = serde_json::to_vec(metadata)?;
        let response = self
            .upload_request(existing_id, "resumable")
            .header("Content-Type", "application/json; charset=UTF-8")
            .header("X-Upload-Content-Type", media.source_mime)
            .header("X-Upload-Content-Length", &media.size.to_string())
            .send(&payload_bytes[..])?;

        let session_url = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        check_status(response)?;
        let session_url = session_url.ok_or_else(|| {
            DriveError::InvalidResponse("resumable upload session has no Location".to_owned())
        })?;

        let response = self
            .agent
            .put(&session_url)
            .header("Content-Type", media.source_mime)
            .send(data)?;

        Ok(check_status(response)?.read_json()?)
    }
}

/// Metadata sent with an upload.
///
/// Creation names the file, places it and sets the target type; an update
/// only replaces content, so its metadata is empty.
fn upload_metadata(
    media: &UploadMedia,
    parent_id: &str,
    target_name: &str,
    existing_id: Option<&str>,
) -> serde_json::Value {
    if existing_id.is_some() {
        return serde_json::json!({});
    }
    serde_json::json!({
        "name": target_name,
        "parents": [parent_id],
        "mimeType": media.target_mime,
    })
}

/// Build a `multipart/related` body: JSON metadata part, then media part.
fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    content_type: &str,
    data: &[u8],
) -> Result<Vec<u8>, DriveError> {
    let mut body = Vec::with_capacity(data.len() + 256);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(&serde_json::to_vec(metadata)?);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    Ok(body)
}
