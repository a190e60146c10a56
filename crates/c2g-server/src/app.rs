//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/spaces", get(handlers::spaces::get_spaces))
        .route("/api/pages", get(handlers::pages::get_pages))
        .route("/api/tree", get(handlers::tree::get_tree))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
