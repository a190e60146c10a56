//! Interactive tree session.

use crate::builder::TreeBuilder;
use crate::error::TreeError;
use crate::tree::PageTree;

/// Holds the tree of the most recent successful query.
///
/// Every query rebuilds from Confluence; a failed query leaves the session
/// empty so a stale tree from another root is never reused.
pub struct TreeSession {
    builder: TreeBuilder,
    current: Option<Query>,
}

struct Query {
    space_key: String,
    page_title: String,
    tree: PageTree,
}

impl TreeSession {
    /// Create an empty session.
    #[must_use]
    pub fn new(builder: TreeBuilder) -> Self {
        Self {
            builder,
            current: None,
        }
    }

    /// Build the tree rooted at `page_title` in `space_key` and keep it.
    pub fn query(
        &mut self,
        space_key: &str,
        page_title: &str,
    ) -> Result<&mut PageTree, TreeError> {
        self.current = None;
        let tree = self.builder.build(space_key, page_title)?;
        let query = self.current.insert(Query {
            space_key: space_key.to_owned(),
            page_title: page_title.to_owned(),
            tree,
        });
        Ok(&mut query.tree)
    }

    /// Current tree, if the last query succeeded.
    #[must_use]
    pub fn tree(&self) -> Option<&PageTree> {
        self.current.as_ref().map(|q| &q.tree)
    }

    /// Mutable access to the current tree.
    pub fn tree_mut(&mut self) -> Option<&mut PageTree> {
        self.current.as_mut().map(|q| &mut q.tree)
    }

    /// `(space_key, page_title)` of the current tree.
    #[must_use]
    pub fn current_query(&self) -> Option<(&str, &str)> {
        self.current
            .as_ref()
            .map(|q| (q.space_key.as_str(), q.page_title.as_str()))
    }

    /// Drop the current tree.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Take ownership of the current tree, leaving the session empty.
    pub fn take(&mut self) -> Option<PageTree> {
        self.current.take().map(|q| q.tree)
    }
}
