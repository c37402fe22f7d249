use std::time::Duration;

use anyhow::{Context, Result};

use crate::signals::{github, npm, pypi, stackexchange};

const DEFAULT_CONNECTOR_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub github_api_url: String,
    pub stackexchange_api_url: String,
    pub npm_api_url: String,
    pub pypi_api_url: String,
    /// Upper bound on a single connector call.
    pub connector_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match std::env::var("CONNECTOR_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .context("CONNECTOR_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_CONNECTOR_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            github_api_url: env_or("GITHUB_API_URL", github::DEFAULT_BASE_URL),
            stackexchange_api_url: env_or("STACKEXCHANGE_API_URL", stackexchange::DEFAULT_BASE_URL),
            npm_api_url: env_or("NPM_API_URL", npm::DEFAULT_BASE_URL),
            pypi_api_url: env_or("PYPI_API_URL", pypi::DEFAULT_BASE_URL),
            connector_timeout: Duration::from_secs(timeout_secs),
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

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
