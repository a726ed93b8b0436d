//! Environment-driven configuration.

use anyhow::{anyhow, Result};

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot authentication token. Required; startup aborts without it.
    pub discord_token: String,
    /// Optional endpoint override for the platform HTTP API (proxy URL).
    pub api_proxy: Option<String>,
    /// Path of the SQLite database holding scheduled reminders.
    pub database_path: String,
    /// Default log filter when RUST_LOG is not set.
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN environment variable not configured"))?;

        let api_proxy = std::env::var("DISCORD_API_PROXY").ok().filter(|v| !v.is_empty());

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "reminders.db".to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            api_proxy,
            database_path,
            log_level,
        })
    }
}
