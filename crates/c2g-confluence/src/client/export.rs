//! Page export for Confluence API.

use std::path::{Path, PathBuf};

use tracing::info;

use super::ConfluenceClient;
use super::pages::not_found_as;
use crate::error::ConfluenceError;
use crate::html::write_export;
use crate::types::Content;

impl ConfluenceClient {
    /// Fetch the export view of a page and save it as `<dir>/<file_stem>.html`.
    ///
    /// Returns the path of the written file.
    pub(crate) fn export_page(
        &self,
        page_id: &str,
        dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Exporting page {}", page_id);

        let content: Content = self
            .get_json(&url, &[("expand", "body.export_view".to_owned())])
            .map_err(|e| not_found_as(e, || format!("page {page_id}")))?;

        let html = content
            .body
            .as_ref()
            .and_then(|b| b.export_view.as_ref())
            .map(|v| v.value.as_str())
            .ok_or_else(|| {
                ConfluenceError::InvalidResponse(format!("page {page_id} has no export view"))
            })?;

        let link = format!("{}{}", self.base_url(), content.webui());
        let path = write_export(dir, file_stem, &link, &content.title, html)?;
        info!("Saved page {} to {}", page_id, path.display());
        Ok(path)
    }
}
