//! Message store: persistence and queries for source messages and their
//! translations.
//!
//! Uses SqlitePoolManager and the models (SourceMessageRecord,
//! TranslationRecord). The (chat_id, message_id) uniqueness constraint is
//! the dedup guard for redelivered events: a duplicate insert surfaces as
//! [`StorageError::AlreadyExists`] instead of a second row.

use crate::error::StorageError;
use crate::models::{RelayStats, SourceMessageRecord, TranslationRecord, TranslationStatus};
use crate::sqlite_pool::SqlitePoolManager;
use tracing::info;

/// A stored source message joined with its translation, if one exists.
#[derive(Debug, Clone)]
pub struct SourceMessageWithTranslation {
    pub message: SourceMessageRecord,
    pub translation: Option<TranslationRecord>,
}

#[derive(Clone)]
pub struct MessageStore {
    pool_manager: SqlitePoolManager,
}

impl MessageStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS source_messages (
                id TEXT PRIMARY KEY,
                message_id INTEGER NOT NULL,
                chat_id TEXT NOT NULL,
                date TEXT NOT NULL,
                text TEXT,
                is_reply BOOLEAN NOT NULL DEFAULT 0,
                reply_to_message_id INTEGER,
                metadata TEXT,
                UNIQUE(chat_id, message_id)
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(StorageError::from)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS translations (
                id TEXT PRIMARY KEY,
                original_message_id TEXT NOT NULL UNIQUE
                    REFERENCES source_messages(id),
                translated_text TEXT,
                target_chat_id TEXT NOT NULL,
                target_message_id INTEGER,
                translation_time_ms INTEGER NOT NULL,
                status TEXT NOT NULL,
                error_message TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(StorageError::from)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_source_messages_chat_id ON source_messages(chat_id)",
        )
        .execute(pool)
        .await
        .map_err(StorageError::from)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_translations_status ON translations(status)",
        )
        .execute(pool)
        .await
        .map_err(StorageError::from)?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Inserts a source message. A (chat_id, message_id) already in the
    /// store comes back as [`StorageError::AlreadyExists`].
    pub async fn save_source_message(
        &self,
        message: &SourceMessageRecord,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO source_messages
                (id, message_id, chat_id, date, text, is_reply, reply_to_message_id, metadata)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(message.message_id)
        .bind(&message.chat_id)
        .bind(message.date)
        .bind(&message.text)
        .bind(message.is_reply)
        .bind(message.reply_to_message_id)
        .bind(&message.metadata)
        .execute(pool)
        .await
        .map_err(|e| {
            StorageError::from_insert(
                e,
                &format!(
                    "source message chat_id={} message_id={}",
                    message.chat_id, message.message_id
                ),
            )
        })?;

        info!(
            "Saved source message: chat_id={}, message_id={}",
            message.chat_id, message.message_id
        );
        Ok(())
    }

    /// Replaces the stored text of a source message (edit propagation).
    pub async fn update_source_message_text(
        &self,
        id: &str,
        text: &str,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query("UPDATE source_messages SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    /// Point lookup by (chat_id, message_id), joined with the translation.
    pub async fn find_by_chat_and_message_id(
        &self,
        chat_id: &str,
        message_id: i64,
    ) -> Result<Option<SourceMessageWithTranslation>, StorageError> {
        let pool = self.pool_manager.pool();

        let message: Option<SourceMessageRecord> = sqlx::query_as(
            "SELECT * FROM source_messages WHERE chat_id = ? AND message_id = ?",
        )
        .bind(chat_id)
        .bind(message_id)
        .fetch_optional(pool)
        .await
        .map_err(StorageError::from)?;

        let Some(message) = message else {
            return Ok(None);
        };

        let translation: Option<TranslationRecord> =
            sqlx::query_as("SELECT * FROM translations WHERE original_message_id = ?")
                .bind(&message.id)
                .fetch_optional(pool)
                .await
                .map_err(StorageError::from)?;

        Ok(Some(SourceMessageWithTranslation {
            message,
            translation,
        }))
    }

    /// Inserts the translation row for a source message.
    pub async fn save_translation(
        &self,
        translation: &TranslationRecord,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO translations
                (id, original_message_id, translated_text, target_chat_id,
                 target_message_id, translation_time_ms, status, error_message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&translation.id)
        .bind(&translation.original_message_id)
        .bind(&translation.translated_text)
        .bind(&translation.target_chat_id)
        .bind(translation.target_message_id)
        .bind(translation.translation_time_ms)
        .bind(translation.status)
        .bind(&translation.error_message)
        .bind(translation.created_at)
        .execute(pool)
        .await
        .map_err(|e| {
            StorageError::from_insert(
                e,
                &format!("translation for message {}", translation.original_message_id),
            )
        })?;

        info!(
            "Saved translation: id={}, status={}",
            translation.id, translation.status
        );
        Ok(())
    }

    /// Mutates an existing translation row in place (edit propagation).
    pub async fn update_translation(
        &self,
        id: &str,
        translated_text: &str,
        translation_time_ms: i64,
        status: TranslationStatus,
        error_message: Option<&str>,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            UPDATE translations
            SET translated_text = ?, translation_time_ms = ?, status = ?, error_message = ?
            WHERE id = ?
            "#,
        )
        .bind(translated_text)
        .bind(translation_time_ms)
        .bind(status)
        .bind(error_message)
        .bind(id)
        .execute(pool)
        .await
        .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("translation {}", id)));
        }

        info!("Updated translation: id={}, status={}", id, status);
        Ok(())
    }

    /// Resolves reply threading: the target-channel message id produced for
    /// the given source message, when both it and its translation exist.
    pub async fn find_reply_target(
        &self,
        chat_id: &str,
        message_id: i64,
    ) -> Result<Option<i64>, StorageError> {
        let pool = self.pool_manager.pool();

        let row: Option<(Option<i64>,)> = sqlx::query_as(
            r#"
            SELECT t.target_message_id
            FROM source_messages m
            JOIN translations t ON t.original_message_id = m.id
            WHERE m.chat_id = ? AND m.message_id = ?
            "#,
        )
        .bind(chat_id)
        .bind(message_id)
        .fetch_optional(pool)
        .await
        .map_err(StorageError::from)?;

        Ok(row.and_then(|(target,)| target))
    }

    /// Aggregate counters over both tables.
    pub async fn stats(&self) -> Result<RelayStats, StorageError> {
        let pool = self.pool_manager.pool();

        let total_messages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM source_messages")
            .fetch_one(pool)
            .await
            .map_err(StorageError::from)?;

        let total_translations: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM translations")
            .fetch_one(pool)
            .await
            .map_err(StorageError::from)?;

        let delivered: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM translations WHERE status IN ('success', 'updated')",
        )
        .fetch_one(pool)
        .await
        .map_err(StorageError::from)?;

        let failed: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM translations WHERE status IN ('failed', 'update_failed')",
        )
        .fetch_one(pool)
        .await
        .map_err(StorageError::from)?;

        Ok(RelayStats {
            total_messages: total_messages.0,
            total_translations: total_translations.0,
            delivered: delivered.0,
            failed: failed.0,
        })
    }
}
