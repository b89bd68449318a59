use sitequote_core::config::LayeredConfig;
use std::env;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Industry catalog and concrete rules, resolved the same way as the CLI
    pub quote: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("SITEQUOTE_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin = env::var("SITEQUOTE_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let quote = LayeredConfig::with_defaults().load_from_env();

        Self { port, cors_origin, quote }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
