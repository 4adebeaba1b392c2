//! Dispatcher setup: feeds source-channel updates into the relay engine.
//!
//! New posts arrive as `message`/`channel_post` updates, edits as
//! `edited_message`/`edited_channel_post`; everything else is dropped. The
//! engine filters by chat identity itself, so the branches stay dumb.

use anyhow::Result;
use relay_core::ToInboundMessage;
use relay_engine::RelayEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{debug, info, instrument};
use url::Url;

use crate::adapters::TelegramMessageWrapper;

async fn on_new_post(msg: Message, engine: Arc<RelayEngine>) -> ResponseResult<()> {
    let event = TelegramMessageWrapper(&msg).to_inbound();
    let outcome = engine.handle_new_message(&event).await;
    debug!(
        chat_id = msg.chat.id.0,
        message_id = msg.id.0,
        outcome = ?outcome,
        "Inbound post handled"
    );
    Ok(())
}

async fn on_edited_post(msg: Message, engine: Arc<RelayEngine>) -> ResponseResult<()> {
    let event = TelegramMessageWrapper(&msg).to_inbound();
    let outcome = engine.handle_edited_message(&event).await;
    debug!(
        chat_id = msg.chat.id.0,
        message_id = msg.id.0,
        outcome = ?outcome,
        "Inbound edit handled"
    );
    Ok(())
}

fn relay_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_new_post))
        .branch(Update::filter_channel_post().endpoint(on_new_post))
        .branch(Update::filter_edited_message().endpoint(on_edited_post))
        .branch(Update::filter_edited_channel_post().endpoint(on_edited_post))
}

/// Logs the bot identity before the dispatcher starts.
async fn log_bot_identity(bot: &teloxide::Bot) {
    match bot.get_me().await {
        Ok(me) => {
            info!(
                username = me.user.username.as_deref().unwrap_or(""),
                bot_id = me.user.id.0,
                "Bot identity confirmed"
            );
        }
        Err(e) => {
            info!(error = %e, "Could not fetch bot identity");
        }
    }
}

/// Runs the relay on Telegram long polling until interrupted.
#[instrument(skip(bot, engine))]
pub async fn run_polling(bot: teloxide::Bot, engine: Arc<RelayEngine>) -> Result<()> {
    log_bot_identity(&bot).await;
    info!("Starting relay in polling mode");

    Dispatcher::builder(bot, relay_handler())
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            debug!(update = ?upd, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Runs the relay behind a webhook: registers `url` with Telegram and
/// listens on 0.0.0.0:`port` for pushed updates.
#[instrument(skip(bot, engine, url))]
pub async fn run_webhook(
    bot: teloxide::Bot,
    engine: Arc<RelayEngine>,
    url: Url,
    port: u16,
) -> Result<()> {
    log_bot_identity(&bot).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%url, %addr, "Starting relay in webhook mode");

    let listener = webhooks::axum(bot.clone(), webhooks::Options::new(addr, url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to set webhook: {}", e))?;

    Dispatcher::builder(bot, relay_handler())
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            debug!(update = ?upd, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}
