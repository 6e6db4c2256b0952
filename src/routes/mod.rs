pub mod api;

use axum::{
    http::{HeaderValue, Method},
    routing::{any, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::handlers::api_not_found;
use crate::state::AppState;
use crate::ws::websocket_handler;

pub use api::create_api_routes;

/// Assemble the full application router
pub fn create_app(state: AppState, config: &Config) -> Router {
    let mut app = Router::new()
        // Mount API routes
        .nest("/api", create_api_routes())
        // Collaboration endpoint
        .route("/ws", get(websocket_handler))
        .route("/ws/*rest", any(api_not_found))
        .with_state(state)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Every other non-API path is answered from the client bundle, index.html included
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(config)),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    match config.allowed_origins() {
        None => cors.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {}", origin);
                        None
                    }
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(origins))
        }
    }
}
