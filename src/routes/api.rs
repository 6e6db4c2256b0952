use crate::handlers::{api_not_found, diagnostics, get_session, health_check, list_sessions, ready_check};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Create API routes
pub fn create_api_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/v1/diagnostics", get(diagnostics))
        .route("/v1/sessions", get(list_sessions))
        .route("/v1/sessions/:session_id", get(get_session))
        .fallback(api_not_found)
}
