//! Error types for tree building and export.

use std::path::PathBuf;

use c2g_confluence::ConfluenceError;

/// Error building a page tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// No page with this title exists in the space.
    #[error("page '{title}' not found in space {space_key}")]
    NotFound {
        /// Space key.
        space_key: String,
        /// Requested root page title.
        title: String,
    },

    /// A page ID appeared twice while walking the hierarchy.
    #[error("page {0} appears more than once in the tree")]
    DuplicatePage(String),

    /// Confluence call failed.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),
}

/// Error exporting a page tree to HTML.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Preparing the destination folder failed.
    #[error("cannot prepare {}: {source}", path.display())]
    Io {
        /// Folder being created or removed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Exporting a single page failed.
    #[error("failed to export page '{title}' ({page_id}): {source}")]
    Page {
        /// Page ID.
        page_id: String,
        /// Page title.
        title: String,
        /// Underlying error.
        #[source]
        source: ConfluenceError,
    },
}
