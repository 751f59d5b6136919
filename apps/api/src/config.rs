use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the extraction service the orchestrator fans out to.
    pub extractor_base_url: String,
    pub embeddings_api_key: String,
    /// Active persistence target. One row per candidate, keyed by email.
    pub resume_table: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            extractor_base_url: require_env("EXTRACTOR_BASE_URL")?,
            embeddings_api_key: require_env("EMBEDDINGS_API_KEY")?,
            resume_table: std::env::var("RESUME_TABLE")
                .unwrap_or_else(|_| "resume_store".to_string()),
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
