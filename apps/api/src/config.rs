use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the generative-model endpoint (OpenAI-compatible).
    pub llm_api_url: String,
    /// Base URL of the LaTeX-to-PDF compile service.
    pub pdf_compile_url: String,
    /// Model used when the client does not name one.
    pub default_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm_api_url: require_env("LLM_API_URL")?,
            pdf_compile_url: require_env("PDF_COMPILE_URL")?,
            default_model: std::env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
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
