//! Confluence access for c2g.
//!
//! This crate provides a sync REST client for the Confluence pages and
//! spaces that c2g exports, behind a [`ConfluenceApi`] trait so the tree
//! engine never depends on the network directly.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ConfluenceApi`] trait with page lookup, child listing, HTML export
//!   and space listing
//! - [`ConfluenceClient`] implementation over `/rest/api` with basic auth
//!   and transparent `start`/`limit` pagination
//! - [`MockConfluence`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use c2g_confluence::{ConfluenceApi, ConfluenceClient};
//!
//! let client = ConfluenceClient::from_config(
//!     "https://example.atlassian.net/wiki",
//!     "me@example.com",
//!     "api-token",
//! );
//! let root = client.resolve_page_id("NL", "Product")?;
//! for child in client.list_child_pages(&root)? {
//!     println!("{} {}", child.id, child.title);
//! }
//! ```

mod api;
mod client;
pub mod error;
mod html;
#[cfg(feature = "mock")]
mod mock;
mod types;

pub use api::ConfluenceApi;
pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use html::EXPORT_EXTENSION;
#[cfg(feature = "mock")]
pub use mock::MockConfluence;
pub use types::{PageInfo, SpaceInfo, parse_timestamp};
