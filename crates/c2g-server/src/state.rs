//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use c2g_confluence::ConfluenceApi;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Confluence collaborator used for every query.
    pub(crate) confluence: Arc<dyn ConfluenceApi>,
    /// Space key used when a request omits `space_key`.
    pub(crate) default_space: String,
}
