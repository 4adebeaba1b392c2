//! RelayEngine: inbound-create and inbound-edit handling.

use relay_core::{ChannelAddress, Delivery, InboundMessage, RelayError, Translator};
use std::sync::Arc;
use std::time::{Duration, Instant};
use storage::{
    MessageStore, SourceMessageRecord, StorageError, TranslationRecord, TranslationStatus,
};
use tracing::{debug, error, info, warn};

use crate::outcome::{RelayOutcome, SkipReason};

/// Upper bounds on the two outbound calls, so one stuck request cannot
/// stall the inbound stream.
#[derive(Debug, Clone, Copy)]
pub struct RelayTimeouts {
    pub translation: Duration,
    pub delivery: Duration,
}

impl Default for RelayTimeouts {
    fn default() -> Self {
        Self {
            translation: Duration::from_secs(60),
            delivery: Duration::from_secs(30),
        }
    }
}

/// Orchestrates one inbound event at a time: filter by source identity,
/// persist, translate, resolve reply linkage, deliver, record the outcome.
///
/// Events arrive serially from the platform client; the engine holds no
/// mutable state of its own, so a shared `Arc<RelayEngine>` is all the
/// dispatcher needs.
pub struct RelayEngine {
    store: MessageStore,
    translator: Arc<dyn Translator>,
    delivery: Arc<dyn Delivery>,
    source_channel: ChannelAddress,
    target_channel: ChannelAddress,
    timeouts: RelayTimeouts,
}

impl RelayEngine {
    pub fn new(
        store: MessageStore,
        translator: Arc<dyn Translator>,
        delivery: Arc<dyn Delivery>,
        source_channel: ChannelAddress,
        target_channel: ChannelAddress,
    ) -> Self {
        Self {
            store,
            translator,
            delivery,
            source_channel,
            target_channel,
            timeouts: RelayTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: RelayTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Handles a new post in the source channel.
    pub async fn handle_new_message(&self, event: &InboundMessage) -> RelayOutcome {
        if !self.source_channel.matches_chat_id(event.chat_id) {
            debug!(chat_id = event.chat_id, "Event not from source channel");
            return RelayOutcome::Skipped(SkipReason::NotSourceChannel);
        }

        let Some(text) = event.text() else {
            debug!(message_id = event.message_id, "No text in message");
            return RelayOutcome::Skipped(SkipReason::NoText);
        };

        info!(message_id = event.message_id, "Message from source channel detected");

        let record = SourceMessageRecord::new(
            event.message_id,
            self.source_channel.canonical().to_string(),
            event.date,
            Some(text.to_string()),
            event.reply_to_message_id,
            event.metadata.clone(),
        );

        match self.store.save_source_message(&record).await {
            Ok(()) => {}
            Err(StorageError::AlreadyExists(what)) => {
                debug!(%what, "Message already processed");
                return RelayOutcome::Skipped(SkipReason::Duplicate);
            }
            Err(e) => {
                // Nothing to correlate results against; abandon the event.
                error!(error = %e, message_id = event.message_id, "Failed to save source message");
                return RelayOutcome::StoreFailed;
            }
        }

        let started = Instant::now();
        let Some(translated) = self.translate(text).await else {
            info!(message_id = event.message_id, "No translation produced");
            return RelayOutcome::TranslationFailed;
        };
        let translation_time_ms = started.elapsed().as_millis() as i64;

        let reply_target = self.resolve_reply_target(event).await;

        match self.send(&translated, reply_target).await {
            Ok(target_message_id) => {
                let translation = TranslationRecord::new(
                    record.id.clone(),
                    Some(translated),
                    self.target_channel.as_str().to_string(),
                    Some(target_message_id),
                    translation_time_ms,
                    TranslationStatus::Success,
                    None,
                );
                self.record_translation(&translation).await;
                info!(
                    message_id = event.message_id,
                    target_message_id, "Translated message delivered"
                );
                RelayOutcome::Delivered { target_message_id }
            }
            Err(e) => {
                error!(error = %e, message_id = event.message_id, "Error forwarding message");
                let translation = TranslationRecord::new(
                    record.id.clone(),
                    Some(translated),
                    self.target_channel.as_str().to_string(),
                    None,
                    translation_time_ms,
                    TranslationStatus::Failed,
                    Some(e.to_string()),
                );
                self.record_translation(&translation).await;
                RelayOutcome::DeliveryFailed
            }
        }
    }

    /// Handles an edit of a source-channel post. Only messages that were
    /// stored and translated once are propagated; everything else is a
    /// silent no-op.
    pub async fn handle_edited_message(&self, event: &InboundMessage) -> RelayOutcome {
        if !self.source_channel.matches_chat_id(event.chat_id) {
            debug!(chat_id = event.chat_id, "Edit not from source channel");
            return RelayOutcome::Skipped(SkipReason::NotSourceChannel);
        }

        let Some(text) = event.text() else {
            debug!(message_id = event.message_id, "No text in edited message");
            return RelayOutcome::Skipped(SkipReason::NoText);
        };

        info!(message_id = event.message_id, "Edit detected in source channel");

        let stored = match self
            .store
            .find_by_chat_and_message_id(self.source_channel.canonical(), event.message_id)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, message_id = event.message_id, "Failed to look up edited message");
                return RelayOutcome::StoreFailed;
            }
        };

        let Some(stored) = stored else {
            debug!(message_id = event.message_id, "Original message not found in store");
            return RelayOutcome::Skipped(SkipReason::NotTracked);
        };
        let Some(translation) = stored.translation else {
            debug!(message_id = event.message_id, "Original message was never translated");
            return RelayOutcome::Skipped(SkipReason::NotTracked);
        };

        let started = Instant::now();
        let Some(translated) = self.translate(text).await else {
            info!(message_id = event.message_id, "No translation produced for edited message");
            return RelayOutcome::TranslationFailed;
        };
        let translation_time_ms = started.elapsed().as_millis() as i64;

        let edit_result = match translation.target_message_id {
            Some(target_message_id) => self.edit(target_message_id, &translated).await,
            // First delivery never succeeded; there is no message to edit.
            None => Err(RelayError::Delivery(
                "no delivered target message to edit".to_string(),
            )),
        };

        match edit_result {
            Ok(()) => {
                if let Err(e) = self
                    .store
                    .update_translation(
                        &translation.id,
                        &translated,
                        translation_time_ms,
                        TranslationStatus::Updated,
                        None,
                    )
                    .await
                {
                    error!(error = %e, "Failed to update translation record");
                }
                if let Err(e) = self
                    .store
                    .update_source_message_text(&stored.message.id, text)
                    .await
                {
                    error!(error = %e, "Failed to update source message text");
                }
                info!(
                    message_id = event.message_id,
                    "Target channel message updated successfully"
                );
                RelayOutcome::Edited
            }
            Err(e) => {
                error!(error = %e, message_id = event.message_id, "Error updating message in target channel");
                if let Err(store_err) = self
                    .store
                    .update_translation(
                        &translation.id,
                        &translated,
                        translation_time_ms,
                        TranslationStatus::UpdateFailed,
                        Some(&e.to_string()),
                    )
                    .await
                {
                    error!(error = %store_err, "Failed to record failed update");
                }
                RelayOutcome::EditFailed
            }
        }
    }

    /// Translation with a bounded timeout; a timeout is just another "no
    /// translation produced".
    async fn translate(&self, text: &str) -> Option<String> {
        match tokio::time::timeout(self.timeouts.translation, self.translator.translate(text))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_secs = self.timeouts.translation.as_secs(),
                    "Translation timed out"
                );
                None
            }
        }
    }

    /// Reply-target resolution failure degrades to an unthreaded send.
    async fn resolve_reply_target(&self, event: &InboundMessage) -> Option<i64> {
        let parent_id = event.reply_to_message_id?;
        match self
            .store
            .find_reply_target(self.source_channel.canonical(), parent_id)
            .await
        {
            Ok(target) => target,
            Err(e) => {
                warn!(error = %e, parent_id, "Error finding reply message");
                None
            }
        }
    }

    async fn send(&self, text: &str, reply_to: Option<i64>) -> relay_core::Result<i64> {
        match tokio::time::timeout(
            self.timeouts.delivery,
            self.delivery.send_message(&self.target_channel, text, reply_to),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RelayError::Delivery(format!(
                "send timed out after {}s",
                self.timeouts.delivery.as_secs()
            ))),
        }
    }

    async fn edit(&self, message_id: i64, text: &str) -> relay_core::Result<()> {
        match tokio::time::timeout(
            self.timeouts.delivery,
            self.delivery
                .edit_message(&self.target_channel, message_id, text),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RelayError::Delivery(format!(
                "edit timed out after {}s",
                self.timeouts.delivery.as_secs()
            ))),
        }
    }

    /// A translation row that cannot be written is logged, not raised; the
    /// delivery already happened and the stream must go on.
    async fn record_translation(&self, translation: &TranslationRecord) {
        if let Err(e) = self.store.save_translation(translation).await {
            error!(error = %e, "Error saving translation to database");
        }
    }
}
