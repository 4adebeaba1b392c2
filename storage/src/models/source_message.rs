//! Source message model: one row per distinct inbound channel message.
//!
//! Maps to the `source_messages` table. At most one row exists per
//! (chat_id, message_id); the table enforces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SourceMessageRecord {
    pub id: String,
    pub message_id: i64,
    pub chat_id: String,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    pub is_reply: bool,
    pub reply_to_message_id: Option<i64>,
    /// Opaque JSON blob: sender info, formatting entities, reply context.
    pub metadata: Option<String>,
}

impl SourceMessageRecord {
    /// Creates a new record with a generated UUID. `is_reply` is derived
    /// from the presence of `reply_to_message_id`.
    pub fn new(
        message_id: i64,
        chat_id: String,
        date: DateTime<Utc>,
        text: Option<String>,
        reply_to_message_id: Option<i64>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message_id,
            chat_id,
            date,
            text,
            is_reply: reply_to_message_id.is_some(),
            reply_to_message_id,
            metadata: metadata.map(|m| m.to_string()),
        }
    }
}
