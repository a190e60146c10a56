//! `c2g tree` command implementation.

use std::path::Path;
use std::sync::Arc;

use c2g_config::Config;
use c2g_tree::{PageTree, TreeBuilder, TreeSession, parse_cutoff};
use chrono::{DateTime, Utc};
use clap::Args;

use crate::commands::confluence_client;
use crate::error::CliError;
use crate::output::Output;

/// Root page and date filter shared by `tree` and `export`.
#[derive(Args)]
pub(crate) struct PageQueryArgs {
    /// Title of the root page.
    page_title: String,

    /// Space key (default: `confluence.default_space`).
    #[arg(short, long)]
    space: Option<String>,

    /// Keep only pages modified on or after this date (YYYY-MM-DD or RFC 3339).
    #[arg(long, value_parser = parse_after)]
    after: Option<DateTime<Utc>>,
}

fn parse_after(value: &str) -> Result<DateTime<Utc>, String> {
    parse_cutoff(value).ok_or_else(|| format!("expected YYYY-MM-DD or RFC 3339, got '{value}'"))
}

impl PageQueryArgs {
    /// Build the tree into `session` and apply the date filter.
    ///
    /// The manual selection starts out equal to the filtered set.
    pub(crate) fn load<'a>(
        &self,
        session: &'a mut TreeSession,
        default_space: &str,
    ) -> Result<&'a mut PageTree, CliError> {
        let space = self.space.as_deref().unwrap_or(default_space);
        let tree = session.query(space, &self.page_title)?;
        if let Some(cutoff) = self.after {
            tree.exclude_older_than(cutoff);
            tree.select_included();
        }
        Ok(tree)
    }
}

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    query: PageQueryArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;
        let default_space = config.require_confluence()?.default_space.clone();
        let confluence = confluence_client(&config)?;

        let mut session = TreeSession::new(TreeBuilder::new(Arc::clone(&confluence)));
        let tree = self.query.load(&mut session, &default_space)?;

        for line in render_tree(tree) {
            if line.included {
                output.line(&line.text);
            } else {
                output.line_dim(&line.text);
            }
        }
        output.success(&format!(
            "{} pages, {} after date filter",
            tree.len(),
            tree.included_count()
        ));
        Ok(())
    }
}

/// One rendered tree line.
pub(crate) struct TreeLine {
    pub(crate) text: String,
    pub(crate) included: bool,
}

/// Indented pre-order listing with export checkboxes.
pub(crate) fn render_tree(tree: &PageTree) -> Vec<TreeLine> {
    tree.preorder()
        .into_iter()
        .map(|idx| {
            let node = tree.node(idx);
            let indent = "  ".repeat(tree.ancestors(idx).len());
            let mark = if node.to_export { "x" } else { " " };
            TreeLine {
                text: format!(
                    "{indent}[{mark}] {} ({}, {})",
                    node.title,
                    node.id,
                    node.modified.format("%Y-%m-%d")
                ),
                included: node.include,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use c2g_confluence::MockConfluence;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Product(1) with Roadmap(2) and Archive(4); Roadmap has Q3(3).
    pub(crate) fn product_site() -> Arc<MockConfluence> {
        Arc::new(
            MockConfluence::new()
                .with_root("NL", "1", "Product", "2024-08-01T00:00:00Z")
                .with_child("1", "2", "Roadmap", "2024-09-01T00:00:00Z")
                .with_child("2", "3", "Q3", "2024-07-15T00:00:00Z")
                .with_child("1", "4", "Archive", "2023-01-01T00:00:00Z"),
        )
    }

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        query: PageQueryArgs,
    }

    fn query(args: &[&str]) -> PageQueryArgs {
        TestCli::try_parse_from(std::iter::once("c2g").chain(args.iter().copied()))
            .unwrap()
            .query
    }

    #[test]
    fn test_after_filters_and_preselects() {
        let mut session = TreeSession::new(TreeBuilder::new(product_site()));

        let tree = query(&["Product", "--after", "2024-08-01"])
            .load(&mut session, "NL")
            .unwrap();

        let lines: Vec<_> = render_tree(tree).into_iter().map(|l| l.text).collect();
        assert_eq!(
            lines,
            vec![
                "[x] Product (1, 2024-08-01)",
                "  [x] Roadmap (2, 2024-09-01)",
                "    [ ] Q3 (3, 2024-07-15)",
                "  [ ] Archive (4, 2023-01-01)",
            ]
        );
    }

    #[test]
    fn test_space_override() {
        let mut session = TreeSession::new(TreeBuilder::new(product_site()));

        let result = query(&["Product", "--space", "ENG"]).load(&mut session, "NL");

        assert!(matches!(result, Err(CliError::Tree(_))));
    }

    #[test]
    fn test_invalid_after_is_rejected_by_parser() {
        let result = TestCli::try_parse_from(["c2g", "Product", "--after", "soon"]);
        assert!(result.is_err());
    }
}
