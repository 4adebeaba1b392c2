//! Inbound message projection shared by all transports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal projection of one inbound channel event (new post or edit).
///
/// Transports convert their native update types into this shape; the relay
/// engine never sees transport types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message id, unique within `chat_id`.
    pub message_id: i64,
    /// Originating chat id as the platform reports it.
    pub chat_id: i64,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    /// Id of the replied-to message in the same chat, if this is a reply.
    pub reply_to_message_id: Option<i64>,
    /// Opaque sender/entity context, stored alongside the message.
    pub metadata: Option<serde_json::Value>,
}

impl InboundMessage {
    /// Returns the trimmed text when it is non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Converts a transport-specific update type to [`InboundMessage`].
pub trait ToInboundMessage: Send + Sync {
    fn to_inbound(&self) -> InboundMessage;
}
