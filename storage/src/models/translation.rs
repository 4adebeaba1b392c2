//! Translation model: the delivered (or failed) counterpart of a source
//! message in the target channel.
//!
//! Maps to the `translations` table. Exactly one row may exist per source
//! message; edits mutate the row in place instead of inserting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Terminal state of one translation row.
///
/// `Success`/`Failed` record the first delivery attempt; `Updated`/
/// `UpdateFailed` record the latest edit propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Success,
    Failed,
    Updated,
    UpdateFailed,
}

impl TranslationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStatus::Success => "success",
            TranslationStatus::Failed => "failed",
            TranslationStatus::Updated => "updated",
            TranslationStatus::UpdateFailed => "update_failed",
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TranslationRecord {
    pub id: String,
    /// Owning reference to `source_messages.id`; unique, so the
    /// relationship is 1:0..1.
    pub original_message_id: String,
    /// Null when translation succeeded but delivery never did.
    pub translated_text: Option<String>,
    pub target_chat_id: String,
    /// Null until a delivery succeeds.
    pub target_message_id: Option<i64>,
    pub translation_time_ms: i64,
    pub status: TranslationStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        original_message_id: String,
        translated_text: Option<String>,
        target_chat_id: String,
        target_message_id: Option<i64>,
        translation_time_ms: i64,
        status: TranslationStatus,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original_message_id,
            translated_text,
            target_chat_id,
            target_message_id,
            translation_time_ms,
            status,
            error_message,
            created_at: Utc::now(),
        }
    }
}
