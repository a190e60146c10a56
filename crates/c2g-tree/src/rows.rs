//! Flat and nested views of a page tree for display.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::selection::GROUP_VALUE_PREFIX;
use crate::tree::PageTree;

/// One table row per page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRow {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Last update time.
    pub modified: DateTime<Utc>,
    /// Parent page title, `None` for the root.
    pub parent: Option<String>,
    /// Date filter verdict.
    pub include: bool,
    /// Manual export selection.
    pub to_export: bool,
    /// Absolute page URL.
    pub link: String,
}

/// Checkbox tree item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectItem {
    /// Display label.
    pub label: String,
    /// Page ID, or `children_<id>` for a group.
    pub value: String,
    /// Nested items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SelectItem>,
}

impl PageTree {
    /// Rows in pre-order.
    #[must_use]
    pub fn rows(&self) -> Vec<PageRow> {
        self.preorder()
            .into_iter()
            .map(|idx| {
                let node = self.node(idx);
                PageRow {
                    id: node.id.clone(),
                    title: node.title.clone(),
                    modified: node.modified,
                    parent: self.parent_of(idx).map(|p| p.title.clone()),
                    include: node.include,
                    to_export: node.to_export,
                    link: node.link.clone(),
                }
            })
            .collect()
    }

    /// Nested checkbox items for the whole tree.
    ///
    /// A page with children yields itself followed by a
    /// `"subpages of '<title>'"` group holding its descendants.
    #[must_use]
    pub fn select_tree(&self) -> Vec<SelectItem> {
        self.select_items(PageTree::ROOT)
    }

    fn select_items(&self, idx: usize) -> Vec<SelectItem> {
        let node = self.node(idx);
        let item = SelectItem {
            label: node.title.clone(),
            value: node.id.clone(),
            children: Vec::new(),
        };
        if node.children().is_empty() {
            return vec![item];
        }

        let group = SelectItem {
            label: format!("subpages of '{}'", node.title),
            value: format!("{GROUP_VALUE_PREFIX}{}", node.id),
            children: node
                .children()
                .iter()
                .flat_map(|&child| self.select_items(child))
                .collect(),
        };
        vec![item, group]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::tests::product_tree;

    #[test]
    fn test_rows() {
        let mut tree = product_tree();
        tree.set_links("https://wiki");
        tree.select_only(&["1"]);

        let rows = tree.rows();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].parent, None);
        assert_eq!(rows[2].title, "Q3");
        assert_eq!(rows[2].parent.as_deref(), Some("Roadmap"));
        assert!(rows[0].to_export);
        assert!(!rows[2].to_export);
        assert_eq!(rows[3].link, "https://wiki/pages/4");
    }

    #[test]
    fn test_select_tree_groups_subpages() {
        let tree = product_tree();

        let items = tree.select_tree();

        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"label": "Product", "value": "1"},
                {
                    "label": "subpages of 'Product'",
                    "value": "children_1",
                    "children": [
                        {"label": "Roadmap", "value": "2"},
                        {
                            "label": "subpages of 'Roadmap'",
                            "value": "children_2",
                            "children": [{"label": "Q3", "value": "3"}]
                        },
                        {"label": "Archive", "value": "4"}
                    ]
                }
            ])
        );
    }
}
