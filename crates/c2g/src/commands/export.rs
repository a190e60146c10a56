//! `c2g export` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use c2g_config::{CliSettings, Config};
use c2g_confluence::ConfluenceApi;
use c2g_task::{ProgressSink, TaskRunner};
use c2g_tree::{ExportError, ExportOptions, HtmlExporter, PageTree, TreeBuilder, TreeSession};
use clap::Args;

use crate::commands::tree::PageQueryArgs;
use crate::commands::{confluence_client, follow_task};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    query: PageQueryArgs,

    /// Export exactly these page IDs instead of the date-filtered set.
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Leave these page IDs out of the export.
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Export profile (overrides config).
    #[arg(long)]
    profile: Option<String>,

    /// Keep existing files in the export folder.
    #[arg(long)]
    no_clean: bool,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            profile: self.profile.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let default_space = config.require_confluence()?.default_space.clone();
        let confluence = confluence_client(&config)?;

        let mut session = TreeSession::new(TreeBuilder::new(Arc::clone(&confluence)));
        {
            let tree = self.query.load(&mut session, &default_space)?;
            let unknown = apply_selection(tree, &self.only, &self.exclude);
            if !unknown.is_empty() {
                output.warning(&format!("Unknown page IDs ignored: {}", unknown.join(", ")));
            }
            if tree.selections_differ() {
                output.warning(&format!(
                    "Selection differs from the date filter: exporting {} of {} pages",
                    tree.export_count(),
                    tree.len()
                ));
            }
            tree.commit_selection();
        }
        // The job gets its own copy; the session is not touched while it runs.
        let Some(tree) = session.take() else {
            return Err(CliError::Validation("no page tree loaded".to_owned()));
        };

        let options = ExportOptions {
            clean: !self.no_clean,
        };
        run_export(
            confluence,
            tree,
            config.export_resolved.export_dir(),
            options,
            &output,
        )
    }
}

/// Apply `--only` then `--exclude` to the manual selection.
///
/// Returns IDs that match no page.
fn apply_selection(tree: &mut PageTree, only: &[String], exclude: &[String]) -> Vec<String> {
    let mut unknown = Vec::new();
    if !only.is_empty() {
        unknown.extend(tree.select_only(only));
    }
    unknown.extend(tree.deselect(exclude));
    unknown
}

/// Export `tree` on a background task and stream its progress.
pub(crate) fn run_export(
    confluence: Arc<dyn ConfluenceApi>,
    tree: PageTree,
    dest: PathBuf,
    options: ExportOptions,
    output: &Output,
) -> Result<(), CliError> {
    output.highlight(&format!(
        "Exporting {} pages to {}",
        tree.export_count(),
        dest.display()
    ));

    let exporter = HtmlExporter::new(confluence, options);
    let mut runner = TaskRunner::new("Exporter");
    runner.start(move |sink| {
        let summary = exporter.export(&tree, &dest, sink)?;
        sink.send(format!(
            "Exported {} pages, skipped {}",
            summary.files.len(),
            summary.skipped
        ));
        Ok::<_, ExportError>(())
    })?;
    follow_task(&mut runner, output)
}

#[cfg(test)]
mod tests {
    use c2g_confluence::MockConfluence;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tree::tests::product_site;

    fn product_tree() -> PageTree {
        TreeBuilder::new(product_site())
            .build("NL", "Product")
            .unwrap()
    }

    fn ids(tree: &PageTree) -> Vec<String> {
        tree.iter()
            .filter(|n| n.to_export)
            .map(|n| n.id.clone())
            .collect()
    }

    #[test]
    fn test_only_replaces_selection() {
        let mut tree = product_tree();

        let unknown = apply_selection(&mut tree, &["2".to_owned(), "99".to_owned()], &[]);

        assert_eq!(ids(&tree), vec!["2"]);
        assert_eq!(unknown, vec!["99"]);
        assert!(tree.selections_differ());
    }

    #[test]
    fn test_exclude_narrows_selection() {
        let mut tree = product_tree();

        let unknown = apply_selection(&mut tree, &[], &["4".to_owned()]);

        assert_eq!(ids(&tree), vec!["1", "2", "3"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_run_export_writes_selected_pages() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("default");
        let mut tree = product_tree();
        tree.select_only(&["1", "3"]);
        tree.commit_selection();

        run_export(
            product_site(),
            tree,
            dest.clone(),
            ExportOptions { clean: true },
            &Output::new(),
        )
        .unwrap();

        assert!(dest.join("Product.html").exists());
        assert!(dest.join("Product").join("Roadmap").join("Q3.html").exists());
        assert!(!dest.join("Product").join("Roadmap.html").exists());
    }

    #[test]
    fn test_run_export_failure_fails_command() {
        let temp = tempfile::tempdir().unwrap();
        let site = Arc::new(
            MockConfluence::new()
                .with_root("NL", "1", "Product", "2024-08-01T00:00:00Z")
                .with_failure("1"),
        );
        let tree = PageTree::new(c2g_confluence::PageInfo {
            id: "1".to_owned(),
            title: "Product".to_owned(),
            modified: c2g_confluence::parse_timestamp("2024-08-01T00:00:00Z").unwrap(),
            webui: "/pages/1".to_owned(),
        });

        let result = run_export(
            site,
            tree,
            temp.path().join("out"),
            ExportOptions::default(),
            &Output::new(),
        );

        assert!(matches!(result, Err(CliError::TaskFailed(name)) if name == "Exporter"));
    }
}
