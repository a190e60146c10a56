//! Spaces API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use c2g_confluence::SpaceInfo;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/spaces.
pub(crate) async fn get_spaces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SpaceInfo>>, ServerError> {
    let spaces =
        tokio::task::spawn_blocking(move || state.confluence.list_global_spaces()).await??;
    tracing::debug!(count = spaces.len(), "Listed spaces");
    Ok(Json(spaces))
}
