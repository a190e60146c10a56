//! Page operations for Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Content, PageInfo, PagedResponse};

/// Page size for child listings.
const CHILD_PAGE_LIMIT: usize = 50;

impl ConfluenceClient {
    /// Resolve a page title within a space to its page ID.
    pub(crate) fn resolve_page_id(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<String, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!("Resolving page {:?} in space {}", title, space_key);

        let response: PagedResponse<Content> = self.get_json(
            &url,
            &[
                ("spaceKey", space_key.to_owned()),
                ("title", title.to_owned()),
                ("type", "page".to_owned()),
            ],
        )?;

        response
            .results
            .into_iter()
            .next()
            .map(|c| c.id)
            .ok_or_else(|| {
                ConfluenceError::NotFound(format!("page {title:?} in space {space_key}"))
            })
    }

    /// Get page metadata including the last update time.
    pub(crate) fn get_page(&self, page_id: &str) -> Result<PageInfo, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Getting page {}", page_id);

        let content: Content = self
            .get_json(&url, &[("expand", "history.lastUpdated".to_owned())])
            .map_err(|e| not_found_as(e, || format!("page {page_id}")))?;
        content.into_page_info()
    }

    /// List direct child pages, following pagination until exhausted.
    pub(crate) fn list_child_pages(&self, page_id: &str) -> Result<Vec<PageInfo>, ConfluenceError> {
        let url = format!("{}/content/{}/child/page", self.api_url(), page_id);

        info!("Listing child pages of {}", page_id);

        let children: Vec<Content> = self
            .get_all(
                &url,
                &[("expand", "history.lastUpdated".to_owned())],
                CHILD_PAGE_LIMIT,
            )
            .map_err(|e| not_found_as(e, || format!("page {page_id}")))?;

        info!("Found {} child pages of {}", children.len(), page_id);
        children.into_iter().map(Content::into_page_info).collect()
    }
}

/// Map a 404 response to [`ConfluenceError::NotFound`].
pub(super) fn not_found_as(err: ConfluenceError, what: impl FnOnce() -> String) -> ConfluenceError {
    if err.is_not_found() {
        ConfluenceError::NotFound(what())
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_as_maps_404() {
        let err = ConfluenceError::HttpResponse {
            status: 404,
            body: "No content found".to_owned(),
        };
        let mapped = not_found_as(err, || "page 7".to_owned());
        assert!(matches!(mapped, ConfluenceError::NotFound(ref what) if what == "page 7"));
    }

    #[test]
    fn test_not_found_as_keeps_other_errors() {
        let err = ConfluenceError::HttpResponse {
            status: 401,
            body: "Unauthorized".to_owned(),
        };
        let mapped = not_found_as(err, || "page 7".to_owned());
        assert!(matches!(mapped, ConfluenceError::HttpResponse { status: 401, .. }));
    }
}
