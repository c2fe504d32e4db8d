use crate::errors::PipelineError;

/// Application configuration loaded from environment variables.
///
/// A missing `ANTHROPIC_API_KEY` is a `Configuration` error before any
/// pipeline run is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, PipelineError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String, PipelineError> {
    std::env::var(key).map_err(|_| {
        PipelineError::Configuration(format!("required environment variable '{key}' is not set"))
    })
}
