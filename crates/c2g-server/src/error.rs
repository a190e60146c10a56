//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use c2g_confluence::ConfluenceError;
use c2g_tree::TreeError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Confluence call failed.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    /// Building the page tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The `after` query parameter is not an RFC 3339 timestamp or date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Blocking worker panicked or was cancelled.
    #[error("worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Confluence(e) | Self::Tree(TreeError::Confluence(e)) if e.is_not_found() => {
                StatusCode::NOT_FOUND
            }
            Self::Tree(TreeError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Confluence(_) | Self::Tree(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}
