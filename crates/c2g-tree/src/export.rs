//! HTML export of a page tree.
//!
//! Each selected page is written to a folder path built from its ancestors'
//! titles, so the local layout mirrors the Confluence hierarchy:
//!
//! ```text
//! exports/default/
//! ├── Product.html
//! └── Product/
//!     ├── Roadmap.html
//!     └── Roadmap/
//!         └── Q3.html
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use c2g_confluence::ConfluenceApi;
use c2g_task::ProgressSink;
use tracing::info;

use crate::error::ExportError;
use crate::naming::segment_names;
use crate::tree::PageTree;

/// Export behaviour switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Delete the destination folder before exporting.
    pub clean: bool,
}

/// Outcome of an export run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Written files in export order.
    pub files: Vec<PathBuf>,
    /// Pages skipped because they were not selected.
    pub skipped: usize,
}

/// Writes the selected pages of a tree as HTML files.
pub struct HtmlExporter {
    confluence: Arc<dyn ConfluenceApi>,
    options: ExportOptions,
}

impl HtmlExporter {
    /// Create an exporter over a Confluence collaborator.
    #[must_use]
    pub fn new(confluence: Arc<dyn ConfluenceApi>, options: ExportOptions) -> Self {
        Self {
            confluence,
            options,
        }
    }

    /// Export every `to_export` page of `tree` under `dest`.
    ///
    /// Unselected pages are skipped but their subtrees are still walked.
    /// Stops at the first page that fails.
    pub fn export(
        &self,
        tree: &PageTree,
        dest: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<ExportSummary, ExportError> {
        if self.options.clean && dest.exists() {
            sink.send(format!("Deleting folder {}", dest.display()));
            fs::remove_dir_all(dest).map_err(|source| ExportError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        }

        if tree.export_count() == 0 {
            info!("Nothing to export");
            sink.send("Nothing to export".to_owned());
            return Ok(ExportSummary {
                files: Vec::new(),
                skipped: tree.len(),
            });
        }

        fs::create_dir_all(dest).map_err(|source| ExportError::Io {
            path: dest.to_path_buf(),
            source,
        })?;

        let names = segment_names(tree);
        let mut summary = ExportSummary::default();

        for idx in tree.preorder() {
            let node = tree.node(idx);
            if !node.to_export {
                summary.skipped += 1;
                continue;
            }

            let dir = tree
                .ancestors(idx)
                .into_iter()
                .fold(dest.to_path_buf(), |dir, a| dir.join(&names[a]));

            info!("Exporting page '{}'", node.title);
            let path = self
                .confluence
                .export_page(&node.id, &dir, &names[idx])
                .map_err(|source| ExportError::Page {
                    page_id: node.id.clone(),
                    title: node.title.clone(),
                    source,
                })?;

            sink.send(format!(
                "Saved page '{}' to '{}'",
                node.title,
                path.display()
            ));
            summary.files.push(path);
        }

        info!(
            "Exported {} pages to {}",
            summary.files.len(),
            dest.display()
        );
        Ok(summary)
    }
}
