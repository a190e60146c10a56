//! Mock Confluence implementation for testing.
//!
//! Provides [`MockConfluence`] for unit testing without network access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;
use crate::html::write_export;
use crate::types::{PageInfo, SpaceInfo, parse_timestamp};

/// Mock Confluence site for testing.
///
/// Holds pages and spaces in memory. Use the builder methods to configure
/// the mock with test data; children are listed in insertion order.
///
/// # Example
///
/// ```ignore
/// use c2g_confluence::{ConfluenceApi, MockConfluence};
///
/// let confluence = MockConfluence::new()
///     .with_root("NL", "1", "Product", "2024-08-01T00:00:00Z")
///     .with_child("1", "2", "Roadmap", "2024-09-01T00:00:00Z");
///
/// let id = confluence.resolve_page_id("NL", "Product")?;
/// let children = confluence.list_child_pages(&id)?;
/// ```
#[derive(Debug)]
pub struct MockConfluence {
    base_url: String,
    pages: RwLock<HashMap<String, PageInfo>>,
    children: RwLock<HashMap<String, Vec<String>>>,
    roots: RwLock<HashMap<(String, String), String>>,
    spaces: RwLock<Vec<SpaceInfo>>,
    failing: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl Default for MockConfluence {
    fn default() -> Self {
        Self {
            base_url: "https://wiki.example.com".to_owned(),
            pages: RwLock::new(HashMap::new()),
            children: RwLock::new(HashMap::new()),
            roots: RwLock::new(HashMap::new()),
            spaces: RwLock::new(Vec::new()),
            failing: RwLock::new(HashSet::new()),
            calls: RwLock::new(Vec::new()),
        }
    }
}

fn page(id: &str, title: &str, modified: &str) -> PageInfo {
    PageInfo {
        id: id.to_owned(),
        title: title.to_owned(),
        modified: parse_timestamp(modified).expect("valid mock timestamp"),
        webui: format!("/pages/{id}"),
    }
}

impl MockConfluence {
    /// Create a new empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page that can be resolved by `(space_key, title)`.
    ///
    /// # Panics
    ///
    /// Panics if `modified` is not a valid timestamp or the lock is poisoned.
    #[must_use]
    pub fn with_root(self, space_key: &str, id: &str, title: &str, modified: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(id.to_owned(), page(id, title, modified));
        self.roots
            .write()
            .unwrap()
            .insert((space_key.to_owned(), title.to_owned()), id.to_owned());
        self
    }

    /// Add a page as the last child of `parent_id`.
    ///
    /// # Panics
    ///
    /// Panics if `modified` is not a valid timestamp or the lock is poisoned.
    #[must_use]
    pub fn with_child(self, parent_id: &str, id: &str, title: &str, modified: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(id.to_owned(), page(id, title, modified));
        self.children
            .write()
            .unwrap()
            .entry(parent_id.to_owned())
            .or_default()
            .push(id.to_owned());
        self
    }

    /// Add a global space.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_space(self, space_key: &str, name: &str) -> Self {
        let id = self.spaces.read().unwrap().len().to_string();
        self.spaces.write().unwrap().push(SpaceInfo {
            space_key: space_key.to_owned(),
            name: name.to_owned(),
            webui: format!("/spaces/{space_key}"),
            id,
        });
        self
    }

    /// Make every call touching `page_id` fail with an HTTP 500.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, page_id: &str) -> Self {
        self.failing.write().unwrap().insert(page_id.to_owned());
        self
    }

    /// Recorded calls as `"<operation> <id>"` strings, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, operation: &str, page_id: &str) -> Result<(), ConfluenceError> {
        self.calls
            .write()
            .unwrap()
            .push(format!("{operation} {page_id}"));
        if self.failing.read().unwrap().contains(page_id) {
            return Err(ConfluenceError::HttpResponse {
                status: 500,
                body: format!("mock failure for page {page_id}"),
            });
        }
        Ok(())
    }

    fn lookup(&self, page_id: &str) -> Result<PageInfo, ConfluenceError> {
        self.pages
            .read()
            .unwrap()
            .get(page_id)
            .cloned()
            .ok_or_else(|| ConfluenceError::NotFound(format!("page {page_id}")))
    }
}

impl ConfluenceApi for MockConfluence {
    fn site_base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve_page_id(&self, space_key: &str, title: &str) -> Result<String, ConfluenceError> {
        self.roots
            .read()
            .unwrap()
            .get(&(space_key.to_owned(), title.to_owned()))
            .cloned()
            .ok_or_else(|| {
                ConfluenceError::NotFound(format!("page {title:?} in space {space_key}"))
            })
    }

    fn get_page(&self, page_id: &str) -> Result<PageInfo, ConfluenceError> {
        self.record("get", page_id)?;
        self.lookup(page_id)
    }

    fn list_child_pages(&self, page_id: &str) -> Result<Vec<PageInfo>, ConfluenceError> {
        self.record("children", page_id)?;
        let ids = self
            .children
            .read()
            .unwrap()
            .get(page_id)
            .cloned()
            .unwrap_or_default();
        ids.iter().map(|id| self.lookup(id)).collect()
    }

    fn export_page(
        &self,
        page_id: &str,
        dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, ConfluenceError> {
        self.record("export", page_id)?;
        let page = self.lookup(page_id)?;
        let link = format!("{}{}", self.base_url, page.webui);
        let html = format!("<h1>{}</h1>\n", page.title);
        Ok(write_export(dir, file_stem, &link, &page.title, &html)?)
    }

    fn list_global_spaces(&self) -> Result<Vec<SpaceInfo>, ConfluenceError> {
        Ok(self.spaces.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_confluence_is_send_sync() {
        assert_send_sync::<MockConfluence>();
    }

    #[test]
    fn test_children_in_insertion_order() {
        let mock = MockConfluence::new()
            .with_root("NL", "1", "Root", "2024-01-01T00:00:00Z")
            .with_child("1", "3", "Zeta", "2024-01-01T00:00:00Z")
            .with_child("1", "2", "Alpha", "2024-01-01T00:00:00Z");

        let titles: Vec<_> = mock
            .list_child_pages("1")
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["Zeta".to_owned(), "Alpha".to_owned()]);
    }

    #[test]
    fn test_resolve_unknown_page_is_not_found() {
        let mock = MockConfluence::new();
        let err = mock.resolve_page_id("NL", "Missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_failure_injection() {
        let mock = MockConfluence::new()
            .with_root("NL", "1", "Root", "2024-01-01T00:00:00Z")
            .with_failure("1");

        assert!(mock.get_page("1").is_err());
        assert_eq!(mock.calls(), vec!["get 1".to_owned()]);
    }

    #[test]
    fn test_export_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let mock = MockConfluence::new().with_root("NL", "1", "Root", "2024-01-01T00:00:00Z");

        let path = mock.export_page("1", temp.path(), "Root").unwrap();

        assert_eq!(path, temp.path().join("Root.html"));
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<p>Source: <a href=\"https://wiki.example.com/pages/1\">"));
    }
}
