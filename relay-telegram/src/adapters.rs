//! Adapters from Telegram (teloxide) types to relay_core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{InboundMessage, ToInboundMessage};

/// Wraps a teloxide Message for conversion to core [`InboundMessage`].
/// Covers both new posts and edited posts; channel posts carry no `from`
/// user, which the metadata blob records as null.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToInboundMessage for TelegramMessageWrapper<'a> {
    fn to_inbound(&self) -> InboundMessage {
        InboundMessage {
            message_id: self.0.id.0 as i64,
            chat_id: self.0.chat.id.0,
            date: self.0.date,
            text: self.0.text().map(|s| s.to_string()),
            reply_to_message_id: self.get_reply_to_message_id(),
            metadata: Some(serde_json::json!({
                "from": &self.0.from,
                "entities": self.0.entities(),
                "reply_to": self.get_reply_to_message_id(),
            })),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Returns the id of the replied-to message if present.
    fn get_reply_to_message_id(&self) -> Option<i64> {
        self.0.reply_to_message().map(|msg| msg.id.0 as i64)
    }
}
