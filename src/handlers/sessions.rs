use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::debug;

use crate::models::{ErrorResponse, SessionResponse, SessionSummary};
use crate::state::AppState;

/// List all sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.store().list().into_iter().map(SessionSummary::from).collect())
}

/// Get the current state of one session. Never creates the session.
pub async fn get_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store().get(&session_id) {
        Some(session) => Ok(Json(session.into())),
        None => {
            debug!("Session {} not found", session_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(format!("Session {} not found", session_id))),
            ))
        }
    }
}
