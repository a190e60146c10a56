//! Child pages API endpoint.
//!
//! Lists the direct children of a page addressed by space key and title.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::DEFAULT_PAGE_TITLE;
use crate::state::AppState;

/// Query parameters for GET /api/pages.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PagesQuery {
    space_key: Option<String>,
    page_title: Option<String>,
}

/// One child page.
#[derive(Debug, Serialize)]
pub(crate) struct ChildPage {
    /// Title of the queried parent page.
    folder: String,
    title: String,
    id: String,
    modified: DateTime<Utc>,
}

/// Handle GET /api/pages.
pub(crate) async fn get_pages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PagesQuery>,
) -> Result<Json<Vec<ChildPage>>, ServerError> {
    let space_key = query
        .space_key
        .unwrap_or_else(|| state.default_space.clone());
    let page_title = query
        .page_title
        .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_owned());
    tracing::debug!(%space_key, %page_title, "Listing child pages");

    let pages = tokio::task::spawn_blocking(move || {
        let page_id = state.confluence.resolve_page_id(&space_key, &page_title)?;
        let children = state.confluence.list_child_pages(&page_id)?;
        Ok::<_, ServerError>(
            children
                .into_iter()
                .map(|page| ChildPage {
                    folder: page_title.clone(),
                    title: page.title,
                    id: page.id,
                    modified: page.modified,
                })
                .collect::<Vec<_>>(),
        )
    })
    .await??;

    Ok(Json(pages))
}
