//! Page tree model.
//!
//! Pages are stored in a flat `Vec<PageNode>` with parent/children
//! relationships tracked by indices. The root always has index
//! [`PageTree::ROOT`]; an ID index gives O(1) lookups by page ID.

use std::collections::HashMap;

use c2g_confluence::PageInfo;
use chrono::{DateTime, Utc};

use crate::error::TreeError;

/// A Confluence page inside a [`PageTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageNode {
    /// Page ID, unique within the tree.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Last update time.
    pub modified: DateTime<Utc>,
    /// Web UI path relative to the site base URL.
    pub webui: String,
    /// Absolute page URL, set once the tree is complete.
    pub link: String,
    /// Result of the date filter.
    pub include: bool,
    /// Manual export selection.
    pub to_export: bool,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl PageNode {
    fn new(page: PageInfo, parent: Option<usize>) -> Self {
        Self {
            id: page.id,
            title: page.title,
            modified: page.modified,
            webui: page.webui,
            link: String::new(),
            include: true,
            to_export: true,
            parent,
            children: Vec::new(),
        }
    }

    /// Index of the parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Child indices in listing order.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// Hierarchy of Confluence pages under one root page.
#[derive(Clone, Debug)]
pub struct PageTree {
    nodes: Vec<PageNode>,
    index: HashMap<String, usize>,
}

impl PageTree {
    /// Index of the root node.
    pub const ROOT: usize = 0;

    /// Create a tree holding only `root`.
    #[must_use]
    pub fn new(root: PageInfo) -> Self {
        let index = HashMap::from([(root.id.clone(), Self::ROOT)]);
        Self {
            nodes: vec![PageNode::new(root, None)],
            index,
        }
    }

    /// Append `page` as the last child of `parent`.
    ///
    /// Returns the new node's index.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a valid index.
    pub fn add_child(&mut self, parent: usize, page: PageInfo) -> Result<usize, TreeError> {
        assert!(parent < self.nodes.len(), "parent index out of range");
        if self.index.contains_key(&page.id) {
            return Err(TreeError::DuplicatePage(page.id));
        }
        let idx = self.nodes.len();
        self.index.insert(page.id.clone(), idx);
        self.nodes.push(PageNode::new(page, Some(parent)));
        self.nodes[parent].children.push(idx);
        Ok(idx)
    }

    /// Set every node's `link` to `base_url` followed by its `webui` path.
    pub fn set_links(&mut self, base_url: &str) {
        let base = base_url.trim_end_matches('/');
        for node in &mut self.nodes {
            node.link = format!("{base}{}", node.webui);
        }
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &PageNode {
        &self.nodes[Self::ROOT]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn node(&self, idx: usize) -> &PageNode {
        &self.nodes[idx]
    }

    /// Index of the node with page ID `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Node with page ID `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Parent node of `idx`.
    #[must_use]
    pub fn parent_of(&self, idx: usize) -> Option<&PageNode> {
        self.nodes[idx].parent.map(|p| &self.nodes[p])
    }

    /// Ancestor indices of `idx`, root first, excluding `idx` itself.
    #[must_use]
    pub fn ancestors(&self, idx: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.nodes[idx].parent;
        while let Some(p) = current {
            chain.push(p);
            current = self.nodes[p].parent;
        }
        chain.reverse();
        chain
    }

    /// Node indices in pre-order (parent before children, children in
    /// listing order).
    #[must_use]
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.nodes[idx].children.iter().rev());
        }
        order
    }

    /// Nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &PageNode> + '_ {
        self.preorder().into_iter().map(|i| &self.nodes[i])
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut PageNode> {
        self.nodes.iter_mut()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use c2g_confluence::parse_timestamp;
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) fn page(id: &str, title: &str, modified: &str) -> PageInfo {
        PageInfo {
            id: id.to_owned(),
            title: title.to_owned(),
            modified: parse_timestamp(modified).unwrap(),
            webui: format!("/pages/{id}"),
        }
    }

    /// Product (2024-08-01)
    /// ├── Roadmap (2024-09-01)
    /// │   └── Q3 (2024-07-15)
    /// └── Archive (2023-01-01)
    pub(crate) fn product_tree() -> PageTree {
        let mut tree = PageTree::new(page("1", "Product", "2024-08-01T00:00:00Z"));
        let roadmap = tree
            .add_child(PageTree::ROOT, page("2", "Roadmap", "2024-09-01T00:00:00Z"))
            .unwrap();
        tree.add_child(roadmap, page("3", "Q3", "2024-07-15T00:00:00Z"))
            .unwrap();
        tree.add_child(PageTree::ROOT, page("4", "Archive", "2023-01-01T00:00:00Z"))
            .unwrap();
        tree
    }

    fn titles(tree: &PageTree, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| tree.node(i).title.clone()).collect()
    }

    #[test]
    fn test_new_tree_has_root_only() {
        let tree = PageTree::new(page("1", "Product", "2024-08-01T00:00:00Z"));
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root().id, "1");
        assert!(tree.root().parent().is_none());
        assert!(tree.root().include);
        assert!(tree.root().to_export);
    }

    #[test]
    fn test_preorder_keeps_listing_order() {
        let tree = product_tree();
        assert_eq!(
            titles(&tree, &tree.preorder()),
            vec!["Product", "Roadmap", "Q3", "Archive"]
        );
    }

    #[test]
    fn test_ancestors_root_first() {
        let tree = product_tree();
        let q3 = tree.index_of("3").unwrap();
        assert_eq!(titles(&tree, &tree.ancestors(q3)), vec!["Product", "Roadmap"]);
        assert!(tree.ancestors(PageTree::ROOT).is_empty());
    }

    #[test]
    fn test_parent_of() {
        let tree = product_tree();
        let q3 = tree.index_of("3").unwrap();
        assert_eq!(tree.parent_of(q3).unwrap().title, "Roadmap");
        assert!(tree.parent_of(PageTree::ROOT).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut tree = product_tree();
        let err = tree
            .add_child(PageTree::ROOT, page("3", "Again", "2024-01-01T00:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, TreeError::DuplicatePage(id) if id == "3"));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_set_links() {
        let mut tree = product_tree();
        tree.set_links("https://wiki.example.com/wiki/");
        assert_eq!(tree.root().link, "https://wiki.example.com/wiki/pages/1");
        assert_eq!(
            tree.get("3").unwrap().link,
            "https://wiki.example.com/wiki/pages/3"
        );
    }
}
