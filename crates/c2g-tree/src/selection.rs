//! Date filter and export selection.
//!
//! `include` is the date filter's verdict and `to_export` the user's manual
//! choice. They are independent until [`PageTree::commit_selection`] copies
//! the manual choice back over the filter.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::tree::PageTree;

/// Prefix of synthetic "subpages of" group values in the select tree.
pub const GROUP_VALUE_PREFIX: &str = "children_";

/// Parse a date filter cutoff.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates, which mean
/// midnight UTC.
#[must_use]
pub fn parse_cutoff(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl PageTree {
    /// Set `include = modified >= cutoff` on every node.
    ///
    /// Overwrites earlier results. Returns the number of excluded nodes.
    pub fn exclude_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let mut excluded = 0;
        for node in self.nodes_mut() {
            node.include = node.modified >= cutoff;
            if !node.include {
                excluded += 1;
            }
        }
        info!("Excluded {} pages modified before {}", excluded, cutoff);
        excluded
    }

    /// Whether the manual selection differs from the filtered set.
    #[must_use]
    pub fn selections_differ(&self) -> bool {
        self.iter().any(|n| n.include != n.to_export)
    }

    /// Select exactly the pages whose IDs are in `ids`.
    ///
    /// Group values (`children_<id>`) are ignored. Returns the values that
    /// match no page.
    pub fn select_only<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        for node in self.nodes_mut() {
            node.to_export = wanted.contains(node.id.as_str());
        }
        self.unknown_ids(&wanted)
    }

    /// Remove the pages whose IDs are in `ids` from the selection.
    ///
    /// Returns the values that match no page.
    pub fn deselect<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        let unwanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        for node in self.nodes_mut() {
            if unwanted.contains(node.id.as_str()) {
                node.to_export = false;
            }
        }
        self.unknown_ids(&unwanted)
    }

    /// Reset the manual selection to the filtered set.
    pub fn select_included(&mut self) {
        for node in self.nodes_mut() {
            node.to_export = node.include;
        }
    }

    /// Make the manual selection the new filtered set.
    pub fn commit_selection(&mut self) {
        for node in self.nodes_mut() {
            node.include = node.to_export;
        }
        debug!("Committed selection of {} pages", self.export_count());
    }

    /// Number of pages passing the date filter.
    #[must_use]
    pub fn included_count(&self) -> usize {
        self.iter().filter(|n| n.include).count()
    }

    /// Number of pages selected for export.
    #[must_use]
    pub fn export_count(&self) -> usize {
        self.iter().filter(|n| n.to_export).count()
    }

    fn unknown_ids(&self, ids: &HashSet<&str>) -> Vec<String> {
        let mut unknown: Vec<String> = ids
            .iter()
            .filter(|id| !id.starts_with(GROUP_VALUE_PREFIX) && self.index_of(id).is_none())
            .map(|id| (*id).to_owned())
            .collect();
        unknown.sort();
        unknown
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::tests::product_tree;

    fn ids_where(tree: &PageTree, f: impl Fn(&crate::PageNode) -> bool) -> Vec<String> {
        tree.iter().filter(|n| f(n)).map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_parse_cutoff() {
        let midnight = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_cutoff("2024-08-01"), Some(midnight));
        assert_eq!(parse_cutoff("2024-08-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_cutoff("last week"), None);
    }

    #[test]
    fn test_filter_keeps_recent_pages() {
        let mut tree = product_tree();
        let cutoff = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();

        let excluded = tree.exclude_older_than(cutoff);

        assert_eq!(excluded, 2);
        assert_eq!(ids_where(&tree, |n| n.include), vec!["1", "2"]);
    }

    #[test]
    fn test_filter_boundary_is_inclusive() {
        let mut tree = product_tree();
        let exactly_root = tree.root().modified;

        tree.exclude_older_than(exactly_root);

        assert!(tree.root().include);
    }

    #[test]
    fn test_filter_is_idempotent_and_overwrites() {
        let mut tree = product_tree();
        let late = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

        tree.exclude_older_than(late);
        assert_eq!(tree.included_count(), 0);

        tree.exclude_older_than(early);
        tree.exclude_older_than(early);
        assert_eq!(tree.included_count(), 4);
    }

    #[test]
    fn test_filter_does_not_touch_selection() {
        let mut tree = product_tree();
        tree.exclude_older_than(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(tree.export_count(), 4);
    }

    #[test]
    fn test_selections_differ() {
        let mut tree = product_tree();
        assert!(!tree.selections_differ());

        tree.exclude_older_than(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
        assert!(tree.selections_differ());

        tree.select_included();
        assert!(!tree.selections_differ());
    }

    #[test]
    fn test_select_only_ignores_groups_and_reports_unknown() {
        let mut tree = product_tree();

        let unknown = tree.select_only(&["2", "children_2", "3", "99"]);

        assert_eq!(unknown, vec!["99"]);
        assert_eq!(ids_where(&tree, |n| n.to_export), vec!["2", "3"]);
    }

    #[test]
    fn test_deselect() {
        let mut tree = product_tree();

        let unknown = tree.deselect(&["4".to_owned()]);

        assert!(unknown.is_empty());
        assert_eq!(ids_where(&tree, |n| n.to_export), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_commit_selection() {
        let mut tree = product_tree();
        tree.select_only(&["1", "3"]);

        tree.commit_selection();

        assert_eq!(ids_where(&tree, |n| n.include), vec!["1", "3"]);
        assert!(!tree.selections_differ());
        assert_eq!(tree.included_count(), 2);
    }
}
