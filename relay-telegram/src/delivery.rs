//! Telegram implementation of [`relay_core::Delivery`].
//!
//! Telegram accepts channel ids in several encodings depending on client
//! context, so each call walks the address renderings in priority order and
//! takes the first success; only exhaustion of all renderings surfaces as a
//! terminal error.

use async_trait::async_trait;
use relay_core::{AddressRendering, ChannelAddress, Delivery, RelayError, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{MessageId, Recipient, ReplyParameters};
use tracing::{info, warn};

/// Thin wrapper around teloxide::Bot that implements the Delivery trait.
pub struct TelegramDelivery {
    bot: teloxide::Bot,
}

/// Maps one address rendering to a teloxide Recipient.
pub fn recipient_for(rendering: &AddressRendering) -> Recipient {
    match rendering {
        AddressRendering::Short(id) | AddressRendering::Full(id) => Recipient::Id(ChatId(*id)),
        AddressRendering::Raw(s) => Recipient::ChannelUsername(s.clone()),
    }
}

/// Stored ids are i64; the wire type is i32. Out-of-range ids cannot name a
/// real message, so the call fails instead of truncating.
fn wire_message_id(id: i64) -> Result<MessageId> {
    i32::try_from(id)
        .map(MessageId)
        .map_err(|_| RelayError::Delivery(format!("message id {} out of i32 range", id)))
}

impl TelegramDelivery {
    /// Creates a delivery adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Delivery for TelegramDelivery {
    async fn send_message(
        &self,
        target: &ChannelAddress,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<i64> {
        let reply_to = reply_to_message_id.map(wire_message_id).transpose()?;
        let mut last_error: Option<String> = None;

        for rendering in target.renderings() {
            let mut request = self
                .bot
                .send_message(recipient_for(&rendering), text.to_string());
            if let Some(reply_to) = reply_to {
                request = request.reply_parameters(ReplyParameters::new(reply_to));
            }

            match request.await {
                Ok(sent) => {
                    info!(rendering = %rendering, message_id = sent.id.0, "Message sent to target channel");
                    return Ok(sent.id.0 as i64);
                }
                Err(e) => {
                    warn!(rendering = %rendering, error = %e, "Send attempt failed");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(RelayError::Delivery(
            last_error.unwrap_or_else(|| "no address renderings to try".to_string()),
        ))
    }

    async fn edit_message(
        &self,
        target: &ChannelAddress,
        message_id: i64,
        text: &str,
    ) -> Result<()> {
        let message_id = wire_message_id(message_id)?;
        let mut last_error: Option<String> = None;

        for rendering in target.renderings() {
            match self
                .bot
                .edit_message_text(recipient_for(&rendering), message_id, text.to_string())
                .await
            {
                Ok(_) => {
                    info!(rendering = %rendering, message_id = message_id.0, "Message edited in target channel");
                    return Ok(());
                }
                Err(e) => {
                    warn!(rendering = %rendering, error = %e, "Edit attempt failed");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(RelayError::Delivery(
            last_error.unwrap_or_else(|| "no address renderings to try".to_string()),
        ))
    }
}
