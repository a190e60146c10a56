//! Confluence collaborator trait.
//!
//! Page-tree building and HTML export only talk to Confluence through
//! [`ConfluenceApi`], so they can run against [`ConfluenceClient`] in
//! production and against an in-memory mock in tests.

use std::path::{Path, PathBuf};

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{PageInfo, SpaceInfo};

/// Operations the page-tree engine needs from Confluence.
pub trait ConfluenceApi: Send + Sync {
    /// Site base URL that page `webui` paths are relative to.
    fn site_base_url(&self) -> &str;

    /// Resolve a page title in a space to its ID.
    ///
    /// Returns [`ConfluenceError::NotFound`] if no such page exists.
    fn resolve_page_id(&self, space_key: &str, title: &str) -> Result<String, ConfluenceError>;

    /// Fetch page metadata.
    fn get_page(&self, page_id: &str) -> Result<PageInfo, ConfluenceError>;

    /// List direct children in server order, fully materialized.
    fn list_child_pages(&self, page_id: &str) -> Result<Vec<PageInfo>, ConfluenceError>;

    /// Render a page into `<dir>/<file_stem>.html` and return the written path.
    fn export_page(
        &self,
        page_id: &str,
        dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, ConfluenceError>;

    /// List all global spaces.
    fn list_global_spaces(&self) -> Result<Vec<SpaceInfo>, ConfluenceError>;
}

impl ConfluenceApi for ConfluenceClient {
    fn site_base_url(&self) -> &str {
        self.base_url()
    }

    fn resolve_page_id(&self, space_key: &str, title: &str) -> Result<String, ConfluenceError> {
        ConfluenceClient::resolve_page_id(self, space_key, title)
    }

    fn get_page(&self, page_id: &str) -> Result<PageInfo, ConfluenceError> {
        ConfluenceClient::get_page(self, page_id)
    }

    fn list_child_pages(&self, page_id: &str) -> Result<Vec<PageInfo>, ConfluenceError> {
        ConfluenceClient::list_child_pages(self, page_id)
    }

    fn export_page(
        &self,
        page_id: &str,
        dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, ConfluenceError> {
        ConfluenceClient::export_page(self, page_id, dir, file_stem)
    }

    fn list_global_spaces(&self) -> Result<Vec<SpaceInfo>, ConfluenceError> {
        ConfluenceClient::list_global_spaces(self)
    }
}
