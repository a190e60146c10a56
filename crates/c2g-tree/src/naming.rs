//! File and folder names derived from page titles.

use std::collections::HashSet;

use crate::tree::PageTree;

/// Make a page title usable as a single path segment.
///
/// Path separators become `_` and surrounding whitespace is trimmed. A
/// title that ends up empty or made only of dots (`.`, `..`) falls back to
/// the page ID, so a segment never refers to the current or parent folder.
#[must_use]
pub fn sanitize_title(title: &str, id: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.chars().all(|c| c == '.') {
        id.to_owned()
    } else {
        cleaned.to_owned()
    }
}

/// Path segment for every node, indexed like the tree.
///
/// Siblings whose sanitized titles collide keep the first one (in listing
/// order) as-is; later ones get `"<title> (<id>)"`, numbered further if a
/// sibling already uses that name.
#[must_use]
pub fn segment_names(tree: &PageTree) -> Vec<String> {
    let mut names = vec![String::new(); tree.len()];
    let root = tree.root();
    names[PageTree::ROOT] = sanitize_title(&root.title, &root.id);

    for idx in tree.preorder() {
        let mut taken = HashSet::new();
        for &child in tree.node(idx).children() {
            let node = tree.node(child);
            let base = sanitize_title(&node.title, &node.id);
            let mut name = base.clone();
            let mut attempt = 1;
            while taken.contains(&name) {
                name = if attempt == 1 {
                    format!("{base} ({})", node.id)
                } else {
                    format!("{base} ({}-{attempt})", node.id)
                };
                attempt += 1;
            }
            taken.insert(name.clone());
            names[child] = name;
        }
    }
    names
}
