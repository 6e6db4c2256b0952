use axum::Json;
use crate::models::HealthResponse;
use tracing::debug;

pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse::ok("Server is running"))
}

/// Sessions live in memory only, so readiness has no dependency to wait for.
pub async fn ready_check() -> Json<HealthResponse> {
    debug!("Readiness check requested");
    Json(HealthResponse::ok("Service is ready"))
}
