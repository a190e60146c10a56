//! HTTP request handlers.
//!
//! Confluence calls block, so every handler runs its work on
//! [`tokio::task::spawn_blocking`].

pub(crate) mod pages;
pub(crate) mod spaces;
pub(crate) mod tree;

/// Root page title used when a request omits `page_title`.
pub(crate) const DEFAULT_PAGE_TITLE: &str = "No page";
