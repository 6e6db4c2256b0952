use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

/// Filter used when RUST_LOG is not set.
pub fn default_filter(config: &Config) -> String {
    format!(
        "codesync_relay=debug,tower_http=debug,axum::rejection=trace,{}",
        config.log_level
    )
}

/// Install the global subscriber. Development gets multi-line pretty output,
/// every other environment a compact single-line format.
pub fn init_tracing(config: &Config) {
    let pretty = config.is_development();
    tracing_subscriber::registry()
        .with(pretty.then(|| fmt::layer().pretty()))
        .with((!pretty).then(|| fmt::layer().compact()))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into()))
        .init();
}
