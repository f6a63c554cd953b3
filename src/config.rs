//! Environment-driven configuration.

use anyhow::{anyhow, Result};
use std::env;
use url::Url;

/// Runtime configuration, loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot secret token. The only required value.
    pub telegram_bot_token: String,
    /// SQLite database URL.
    pub database_url: String,
    /// Port for the health check server.
    pub http_port: u16,
    /// Externally reachable host name. When set, the bot receives updates
    /// via webhook instead of long-polling.
    pub webhook_host: Option<String>,
    /// Local port the webhook listener binds to.
    pub webhook_port: u16,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults for
    /// everything except the bot token.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "sqlite:./data/memory_bot.db".to_string());

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let webhook_host = env::var("WEBHOOK_HOST")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let webhook_port = env::var("WEBHOOK_PORT")
            .unwrap_or_else(|_| "8443".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid WEBHOOK_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            webhook_host,
            webhook_port,
        })
    }

    /// The externally reachable webhook URL, if webhook mode is configured.
    /// The path is derived from the bot token, matching what Telegram is told
    /// via `setWebhook`.
    pub fn webhook_url(&self) -> Result<Option<Url>> {
        match &self.webhook_host {
            Some(host) => {
                let url = Url::parse(&format!("https://{}/{}", host, self.telegram_bot_token))
                    .map_err(|e| anyhow!("Invalid WEBHOOK_HOST: {e}"))?;
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }
}
