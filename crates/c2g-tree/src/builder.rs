//! Remote page tree builder.

use std::sync::Arc;

use c2g_confluence::ConfluenceApi;
use tracing::info;

use crate::error::TreeError;
use crate::tree::PageTree;

/// Builds a [`PageTree`] by walking Confluence depth-first.
///
/// Each node costs one child listing; nothing is cached between builds.
/// Any failed call aborts the build.
pub struct TreeBuilder {
    confluence: Arc<dyn ConfluenceApi>,
}

impl TreeBuilder {
    /// Create a builder over a Confluence collaborator.
    #[must_use]
    pub fn new(confluence: Arc<dyn ConfluenceApi>) -> Self {
        Self { confluence }
    }

    /// Build the tree rooted at the page titled `page_title` in `space_key`.
    ///
    /// Every node starts with `include` and `to_export` set.
    pub fn build(&self, space_key: &str, page_title: &str) -> Result<PageTree, TreeError> {
        info!("Building page tree for '{}' in space {}", page_title, space_key);

        let root_id = self
            .confluence
            .resolve_page_id(space_key, page_title)
            .map_err(|e| {
                if e.is_not_found() {
                    TreeError::NotFound {
                        space_key: space_key.to_owned(),
                        title: page_title.to_owned(),
                    }
                } else {
                    TreeError::Confluence(e)
                }
            })?;

        let root = self.confluence.get_page(&root_id)?;
        let mut tree = PageTree::new(root);
        self.add_children(&mut tree, PageTree::ROOT)?;
        tree.set_links(self.confluence.site_base_url());

        info!("Built page tree with {} pages", tree.len());
        Ok(tree)
    }

    fn add_children(&self, tree: &mut PageTree, idx: usize) -> Result<(), TreeError> {
        let page_id = tree.node(idx).id.clone();
        for child in self.confluence.list_child_pages(&page_id)? {
            let child_idx = tree.add_child(idx, child)?;
            self.add_children(tree, child_idx)?;
        }
        Ok(())
    }
}
