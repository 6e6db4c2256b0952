pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod ws;

pub use config::Config;
pub use routes::create_app;
pub use state::AppState;
