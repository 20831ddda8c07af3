use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables once at startup.
/// Nothing reads the environment after this point; values are injected where needed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. When unset the API runs on the in-memory store.
    pub database_url: Option<String>,
    pub ai: AiConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Settings for the outbound chat-completion client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            ai: AiConfig {
                api_key: optional_env("AI_API_KEY").unwrap_or_default(),
                endpoint: optional_env("AI_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_AI_ENDPOINT.to_string()),
                timeout: Duration::from_secs(
                    optional_env("AI_TIMEOUT_SECS")
                        .map(|v| v.parse::<u64>())
                        .transpose()
                        .context("AI_TIMEOUT_SECS must be a whole number of seconds")?
                        .unwrap_or(30),
                ),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
