use codesync_relay::{create_app, session::SessionStore, telemetry, AppState, Config};
use std::panic;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Load configuration, then install tracing so the outcome is logged
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    telemetry::init_tracing(&config);

    info!("Starting server...");
    match load_error {
        None => info!("✅ Configuration loaded successfully ({} environment)", config.environment),
        Some(e) => {
            error!("❌ Failed to load configuration: {}", e);
            warn!("Using default configuration");
        }
    }

    let state = AppState::new(Arc::new(SessionStore::new()));
    let app = create_app(state, &config);

    let listener = match tokio::net::TcpListener::bind(config.server_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", config.server_address(), e);
            std::process::exit(1);
        }
    };

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/ws", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
    info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
