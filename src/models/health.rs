use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness and readiness probe body
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
