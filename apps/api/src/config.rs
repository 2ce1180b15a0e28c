use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// `DATABASE_URL` is required; the external-service credentials are optional.
/// Without `CEREBRAS_API_KEY` the service falls back to rule-based scoring;
/// without `GITHUB_TOKEN` GitHub calls run unauthenticated (lower rate limits).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub github_token: Option<String>,
    pub cerebras_api_key: Option<String>,
    pub cerebras_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            github_token: optional_env("GITHUB_TOKEN"),
            cerebras_api_key: optional_env("CEREBRAS_API_KEY"),
            cerebras_model: std::env::var("CEREBRAS_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Empty strings count as unset so a blank line in .env does not enable a backend.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
