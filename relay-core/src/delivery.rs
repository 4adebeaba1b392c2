//! Delivery abstraction: send or edit a message in the target channel.
//!
//! Implementations map to a transport (e.g. Telegram via teloxide) and own
//! the address-rendering fallback; the engine only sees one terminal result
//! per call.

use crate::channel::ChannelAddress;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Delivery: Send + Sync {
    /// Sends `text` to the target channel, optionally threaded as a reply to
    /// an already-delivered message. Returns the delivered message id.
    async fn send_message(
        &self,
        target: &ChannelAddress,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<i64>;

    /// Edits the text of a previously delivered message.
    async fn edit_message(
        &self,
        target: &ChannelAddress,
        message_id: i64,
        text: &str,
    ) -> Result<()>;
}
