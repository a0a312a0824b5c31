use std::{sync::Arc, time::Duration};

use anyhow::Context;

const DEFAULT_STEAM_API_URL: &str = "https://api.steampowered.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    /// Steam Web API key, shared with every lookup.
    pub steam_api_key: Arc<str>,
    pub steam_api_url: String,
    pub steam_api_timeout: Duration,
}

// the key must never end up in logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("steam_api_key", &"<redacted>")
            .field("steam_api_url", &self.steam_api_url)
            .field("steam_api_timeout", &self.steam_api_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("Failed to load .env file");
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let steam_api_key = lookup("STEAM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("STEAM_API_KEY is not set")?;

        let steam_api_url = lookup("STEAM_API_URL")
            .unwrap_or_else(|| DEFAULT_STEAM_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let steam_api_timeout = match lookup("STEAM_API_TIMEOUT") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("STEAM_API_TIMEOUT is not a number: {:?}", secs))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").unwrap_or_else(|| "5158".to_string()),
            steam_api_key: steam_api_key.trim().into(),
            steam_api_url,
            steam_api_timeout: Duration::from_secs(steam_api_timeout),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
