//! Relay config: channels, translation endpoint, delivery mode, logging,
//! database. Loaded from env.

use anyhow::Result;
use relay_core::RelayError;
use std::env;
use std::str::FromStr;

/// How updates reach the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Long polling (default; demo deployments).
    Poll,
    /// Webhook push behind a public URL (production deployments).
    Webhook,
}

impl FromStr for DeliveryMode {
    type Err = RelayError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poll" | "polling" | "demo" => Ok(DeliveryMode::Poll),
            "webhook" | "prod" => Ok(DeliveryMode::Webhook),
            other => Err(RelayError::Config(format!("Unknown MODE: {}", other))),
        }
    }
}

/// Full relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// BOT_TOKEN or TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// SOURCE_CHANNEL_ID — channel whose posts are relayed
    pub source_channel: String,
    /// TARGET_CHANNEL_ID — channel translated posts are delivered to
    pub target_channel: String,
    /// OPENROUTER_API_KEY
    pub openrouter_api_key: String,
    /// OPENROUTER_MODEL
    pub openrouter_model: String,
    /// OPENROUTER_BASE_URL
    pub openrouter_base_url: String,
    /// AI_PROMPT — optional override of the built-in system prompt
    pub system_prompt: Option<String>,
    /// MODE (poll/webhook)
    pub mode: DeliveryMode,
    /// WEBHOOK_URL — required in webhook mode
    pub webhook_url: Option<String>,
    /// PORT — webhook listen port
    pub port: u16,
    /// Message persistence database URL (SQLite)
    pub database_url: String,
    /// Log file path
    pub log_file: String,
    /// TRANSLATION_TIMEOUT_SECS / DELIVERY_TIMEOUT_SECS
    pub translation_timeout_secs: u64,
    pub delivery_timeout_secs: u64,
}

impl RelayConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let source_channel = env::var("SOURCE_CHANNEL_ID")
            .map_err(|_| anyhow::anyhow!("SOURCE_CHANNEL_ID not set"))?;
        let target_channel = env::var("TARGET_CHANNEL_ID")
            .map_err(|_| anyhow::anyhow!("TARGET_CHANNEL_ID not set"))?;
        let openrouter_api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY not set"))?;
        let openrouter_model = env::var("OPENROUTER_MODEL")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_MODEL not set"))?;
        let openrouter_base_url = env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| translator::OPENROUTER_BASE_URL.to_string());
        let system_prompt = env::var("AI_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let mode = env::var("MODE")
            .unwrap_or_else(|_| "poll".to_string())
            .parse::<DeliveryMode>()?;
        let webhook_url = env::var("WEBHOOK_URL").ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "signal_relay.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/signal-relay.log".to_string());
        let translation_timeout_secs = env::var("TRANSLATION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        let delivery_timeout_secs = env::var("DELIVERY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            bot_token,
            source_channel,
            target_channel,
            openrouter_api_key,
            openrouter_model,
            openrouter_base_url,
            system_prompt,
            mode,
            webhook_url,
            port,
            database_url,
            log_file,
            translation_timeout_secs,
            delivery_timeout_secs,
        })
    }

    /// Validate config (webhook mode requires a parseable WEBHOOK_URL).
    pub fn validate(&self) -> Result<()> {
        if self.mode == DeliveryMode::Webhook {
            match &self.webhook_url {
                None => anyhow::bail!("MODE=webhook but WEBHOOK_URL is not set"),
                Some(url_str) => {
                    if url::Url::parse(url_str).is_err() {
                        anyhow::bail!("WEBHOOK_URL is set but not a valid URL: {}", url_str);
                    }
                }
            }
        }
        Ok(())
    }
}
