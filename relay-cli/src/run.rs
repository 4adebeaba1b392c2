//! Relay assembly: wires store, translator, delivery, and engine together
//! and hands the result to the chosen dispatch mode.

use anyhow::{Context, Result};
use relay_core::ChannelAddress;
use relay_engine::{RelayEngine, RelayTimeouts};
use relay_telegram::{run_polling, run_webhook, TelegramDelivery};
use std::sync::Arc;
use std::time::Duration;
use storage::MessageStore;
use tracing::info;
use translator::SignalTranslator;
use url::Url;

use crate::config::{DeliveryMode, RelayConfig};

/// Builds the relay from config and runs it until interrupted.
pub async fn run_relay(config: RelayConfig) -> Result<()> {
    let store = MessageStore::new(&config.database_url)
        .await
        .context("Open message store")?;
    info!(database_url = %config.database_url, "Message store ready");

    let mut translator = SignalTranslator::with_base_url(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
        config.openrouter_base_url.clone(),
    );
    if let Some(prompt) = &config.system_prompt {
        translator = translator.with_system_prompt(prompt.clone());
    }
    info!(model = %config.openrouter_model, "Translator ready");

    let bot = teloxide::Bot::new(&config.bot_token);
    let delivery = TelegramDelivery::new(bot.clone());

    let timeouts = RelayTimeouts {
        translation: Duration::from_secs(config.translation_timeout_secs),
        delivery: Duration::from_secs(config.delivery_timeout_secs),
    };
    let engine = Arc::new(
        RelayEngine::new(
            store,
            Arc::new(translator),
            Arc::new(delivery),
            ChannelAddress::new(&config.source_channel),
            ChannelAddress::new(&config.target_channel),
        )
        .with_timeouts(timeouts),
    );
    info!(
        source = %config.source_channel,
        target = %config.target_channel,
        "Relay engine ready"
    );

    match config.mode {
        DeliveryMode::Poll => run_polling(bot, engine).await,
        DeliveryMode::Webhook => {
            // validate() guarantees the URL is present and parseable here.
            let url_str = config
                .webhook_url
                .as_deref()
                .context("WEBHOOK_URL is required in webhook mode")?;
            let url = Url::parse(url_str).context("Parse WEBHOOK_URL")?;
            run_webhook(bot, engine, url, config.port).await
        }
    }
}
