use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port, shared by the HTTP API and the websocket endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod). Development selects pretty log output.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Comma separated CORS origins. Unset or "*" allows any origin.
    pub cors_origins: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the built client bundle
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables or app.env file.
    /// Runs before tracing is installed, so the caller logs the outcome.
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        envy::from_env::<Config>().map_err(ConfigError::EnvError)
    }

    /// Build a configuration from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(ConfigError::EnvError)
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Explicit CORS origins, or `None` when any origin is allowed.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let raw = self.cors_origins.as_deref()?.trim();
        if raw.is_empty() || raw == "*" {
            return None;
        }
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() { None } else { Some(origins) }
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: None,
            static_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.server_address(), "0.0.0.0:3001");
        assert!(config.is_development());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn environment_selects_development_mode() {
        for env in ["dev", "Development"] {
            let config = Config::from_vars(vars(&[("ENVIRONMENT", env)])).unwrap();
            assert!(config.is_development(), "{env}");
        }
        let config = Config::from_vars(vars(&[("ENVIRONMENT", "production")])).unwrap();
        assert!(!config.is_development());
    }

    #[test]
    fn port_and_host_come_from_env() {
        let config = Config::from_vars(vars(&[("HOST", "127.0.0.1"), ("PORT", "8080")])).unwrap();
        assert_eq!(config.server_address(), "127.0.0.1:8080");
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_vars(vars(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().starts_with("Environment variable error"));
    }

    #[test]
    fn wildcard_cors_means_any_origin() {
        let config = Config::from_vars(vars(&[("CORS_ORIGINS", "*")])).unwrap();
        assert_eq!(config.allowed_origins(), None);
        assert_eq!(Config::default().allowed_origins(), None);
    }

    #[test]
    fn cors_list_is_split_and_trimmed() {
        let config = Config::from_vars(vars(&[(
            "CORS_ORIGINS",
            "http://localhost:5173, https://example.com,",
        )]))
        .unwrap();
        assert_eq!(
            config.allowed_origins(),
            Some(vec!["http://localhost:5173".to_string(), "https://example.com".to_string()])
        );
    }
}
