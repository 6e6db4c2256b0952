use axum::{extract::OriginalUri, http::StatusCode, Json};
use tracing::debug;

use crate::models::ErrorResponse;

/// Answer for paths under the API or websocket prefixes that match no route.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<ErrorResponse>) {
    debug!("No route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found(format!("No route for {}", uri.path()))),
    )
}
