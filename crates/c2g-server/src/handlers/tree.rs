//! Page tree API endpoint.
//!
//! Builds the whole tree under a root page, applies the optional date
//! filter and returns it both as table rows and as a checkbox tree.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use c2g_tree::{PageRow, SelectItem, TreeBuilder, parse_cutoff};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::DEFAULT_PAGE_TITLE;
use crate::state::AppState;

/// Query parameters for GET /api/tree.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TreeQuery {
    space_key: Option<String>,
    page_title: Option<String>,
    /// Keep only pages modified at or after this date.
    after: Option<String>,
}

/// Response for GET /api/tree.
#[derive(Debug, Serialize)]
pub(crate) struct TreeResponse {
    space_key: String,
    page_title: String,
    /// Pages in pre-order.
    rows: Vec<PageRow>,
    select_tree: Vec<SelectItem>,
    total: usize,
    included: usize,
}

/// Handle GET /api/tree.
pub(crate) async fn get_tree(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<TreeResponse>, ServerError> {
    let cutoff = query
        .after
        .as_deref()
        .map(|raw| parse_cutoff(raw).ok_or_else(|| ServerError::InvalidDate(raw.to_owned())))
        .transpose()?;
    let space_key = query
        .space_key
        .unwrap_or_else(|| state.default_space.clone());
    let page_title = query
        .page_title
        .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_owned());

    let response = tokio::task::spawn_blocking(move || {
        let builder = TreeBuilder::new(Arc::clone(&state.confluence));
        let mut tree = builder.build(&space_key, &page_title)?;
        if let Some(cutoff) = cutoff {
            tree.exclude_older_than(cutoff);
            tree.select_included();
        }
        Ok::<_, ServerError>(TreeResponse {
            rows: tree.rows(),
            select_tree: tree.select_tree(),
            total: tree.len(),
            included: tree.included_count(),
            space_key,
            page_title,
        })
    })
    .await??;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use c2g_confluence::MockConfluence;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::handlers::tests::{product_site, state_with};

    fn query(raw: &str) -> Query<TreeQuery> {
        Query(serde_urlencoded::from_str(raw).unwrap())
    }

    #[tokio::test]
    async fn test_full_tree_without_filter() {
        let state = state_with(product_site());

        let Json(tree) = get_tree(State(state), query("page_title=Product"))
            .await
            .unwrap();

        assert_eq!(tree.space_key, "NL");
        assert_eq!(tree.total, 4);
        assert_eq!(tree.included, 4);
        let titles: Vec<_> = tree.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Product", "Roadmap", "Q3", "Archive"]);
        assert_eq!(tree.rows[1].link, "https://wiki.example.com/pages/2");
        assert_eq!(tree.select_tree[1].value, "children_1");
    }

    #[tokio::test]
    async fn test_after_filters_and_selects() {
        let state = state_with(product_site());

        let Json(tree) = get_tree(State(state), query("page_title=Product&after=2024-08-01"))
            .await
            .unwrap();

        assert_eq!(tree.included, 2);
        let selected: Vec<_> = tree
            .rows
            .iter()
            .filter(|r| r.to_export)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(selected, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_invalid_after_is_rejected() {
        let state = state_with(product_site());

        let err = get_tree(State(state), query("page_title=Product&after=soon"))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remote_failure_is_bad_gateway() {
        let state = state_with(product_site().with_failure("2"));

        let err = get_tree(State(state), query("page_title=Product"))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unknown_root_is_not_found() {
        let state = state_with(MockConfluence::new());

        let err = get_tree(State(state), query("")).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
