use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Session, connection and host statistics
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Current diagnostics", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

/// List all sessions
#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    responses(
        (status = 200, description = "All known sessions", body = [SessionSummary])
    )
)]
#[allow(dead_code)]
pub async fn list_sessions_doc() {}

/// Current state of a session
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{session_id}",
    params(
        ("session_id" = String, Path, description = "Session identifier")
    ),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn get_session_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        diagnostics_doc,
        list_sessions_doc,
        get_session_doc,
    ),
    components(
        schemas(HealthResponse, DiagnosticsResponse, SessionResponse, SessionSummary, ErrorResponse)
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
