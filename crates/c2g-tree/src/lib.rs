//! Confluence page tree engine for c2g.
//!
//! Builds an in-memory hierarchy of Confluence pages, filters it by
//! modification date, tracks a manual export selection and writes the
//! selected pages to a local folder layout that mirrors the hierarchy.
//!
//! # Architecture
//!
//! - [`PageTree`] stores pages in a flat `Vec<PageNode>` arena with
//!   parent/children indices
//! - [`TreeBuilder`] walks Confluence depth-first through a
//!   [`ConfluenceApi`](c2g_confluence::ConfluenceApi)
//! - [`PageTree::exclude_older_than`] and the selection methods set the
//!   `include` and `to_export` flags
//! - [`HtmlExporter`] writes `to_export` pages under a destination folder
//! - [`TreeSession`] holds the tree between interactive steps
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use c2g_task::TracingSink;
//! use c2g_tree::{ExportOptions, HtmlExporter, TreeBuilder};
//!
//! let mut tree = TreeBuilder::new(Arc::clone(&confluence)).build("NL", "Product")?;
//! tree.exclude_older_than(cutoff);
//! tree.select_included();
//! tree.commit_selection();
//!
//! let exporter = HtmlExporter::new(confluence, ExportOptions { clean: true });
//! exporter.export(&tree, Path::new("exports/default"), &TracingSink)?;
//! ```

mod builder;
mod error;
mod export;
mod naming;
mod rows;
mod selection;
mod session;
mod tree;

pub use builder::TreeBuilder;
pub use error::{ExportError, TreeError};
pub use export::{ExportOptions, ExportSummary, HtmlExporter};
pub use naming::{sanitize_title, segment_names};
pub use rows::{PageRow, SelectItem};
pub use selection::{GROUP_VALUE_PREFIX, parse_cutoff};
pub use session::TreeSession;
pub use tree::{PageNode, PageTree};
