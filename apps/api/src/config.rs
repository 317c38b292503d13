use anyhow::{Context, Result};

const DEFAULT_JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// RapidAPI key for JSearch. Optional at startup so `/health` can report it missing.
    pub rapidapi_key: Option<String>,
    pub jsearch_base_url: String,
    pub jsearch_host: String,
    pub upstream_timeout_secs: u64,
    pub environment: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            rapidapi_key: optional_env("RAPIDAPI_KEY"),
            jsearch_base_url: optional_env("JSEARCH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_JSEARCH_BASE_URL.to_string()),
            jsearch_host: optional_env("JSEARCH_HOST")
                .unwrap_or_else(|| DEFAULT_JSEARCH_HOST.to_string()),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            environment: optional_env("APP_ENV").unwrap_or_else(|| "development".to_string()),
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

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
