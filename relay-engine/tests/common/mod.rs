//! Mock collaborators and fixtures for relay engine tests.
//!
//! `MockDelivery` records every send/edit call so tests can assert on reply
//! threading and call counts without hitting a real transport;
//! `MockTranslator` produces a deterministic translation or fails on demand.

use async_trait::async_trait;
use relay_core::{ChannelAddress, Delivery, InboundMessage, RelayError, Translator};
use relay_engine::RelayEngine;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::MessageStore;
use tempfile::TempDir;

pub const SOURCE_CHANNEL: &str = "-1001111111111";
pub const TARGET_CHANNEL: &str = "-1002222222222";

/// Source chat id as Telegram reports it on the wire.
pub const SOURCE_CHAT_ID: i64 = -1001111111111;

/// What the mock translator does with each request.
#[derive(Clone, Copy)]
pub enum TranslatorBehavior {
    /// Return `"fa:" + text`.
    Succeed,
    /// Return `None`, as the real client does on endpoint failure.
    Fail,
    /// Never answer within any reasonable test timeout.
    Hang,
}

pub struct MockTranslator {
    behavior: TranslatorBehavior,
}

impl MockTranslator {
    pub fn new(behavior: TranslatorBehavior) -> Arc<Self> {
        Arc::new(Self { behavior })
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Option<String> {
        match self.behavior {
            TranslatorBehavior::Succeed => Some(format!("fa:{}", text)),
            TranslatorBehavior::Fail => None,
            TranslatorBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                None
            }
        }
    }
}

/// One recorded `send_message` call.
#[derive(Debug, Clone)]
pub struct SendRecord {
    pub target: String,
    pub text: String,
    pub reply_to_message_id: Option<i64>,
}

/// One recorded `edit_message` call.
#[derive(Debug, Clone)]
pub struct EditRecord {
    pub target: String,
    pub message_id: i64,
    pub text: String,
}

/// Mock Delivery that records calls and returns sequential message ids.
pub struct MockDelivery {
    fail: bool,
    next_message_id: AtomicI64,
    pub sends: Mutex<Vec<SendRecord>>,
    pub edits: Mutex<Vec<EditRecord>>,
}

impl MockDelivery {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            next_message_id: AtomicI64::new(1),
            sends: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            next_message_id: AtomicI64::new(1),
            sends: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
        })
    }

    pub fn send_count(&self) -> usize {
        self.sends.lock().unwrap().len()
    }

    pub fn last_send(&self) -> Option<SendRecord> {
        self.sends.lock().unwrap().last().cloned()
    }

    pub fn last_edit(&self) -> Option<EditRecord> {
        self.edits.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Delivery for MockDelivery {
    async fn send_message(
        &self,
        target: &ChannelAddress,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> relay_core::Result<i64> {
        self.sends.lock().unwrap().push(SendRecord {
            target: target.as_str().to_string(),
            text: text.to_string(),
            reply_to_message_id,
        });
        if self.fail {
            return Err(RelayError::Delivery("mock send failure".to_string()));
        }
        Ok(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn edit_message(
        &self,
        target: &ChannelAddress,
        message_id: i64,
        text: &str,
    ) -> relay_core::Result<()> {
        self.edits.lock().unwrap().push(EditRecord {
            target: target.as_str().to_string(),
            message_id,
            text: text.to_string(),
        });
        if self.fail {
            return Err(RelayError::Delivery("mock edit failure".to_string()));
        }
        Ok(())
    }
}

/// Builds an engine over a fresh on-disk store. The store handle is cloned
/// out so tests can inspect rows; the TempDir must stay alive with it.
pub async fn make_engine(
    translator: Arc<MockTranslator>,
    delivery: Arc<MockDelivery>,
) -> (RelayEngine, MessageStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("relay.db");
    let store = MessageStore::new(path.to_str().unwrap())
        .await
        .expect("Failed to create store");

    let engine = RelayEngine::new(
        store.clone(),
        translator,
        delivery,
        ChannelAddress::new(SOURCE_CHANNEL),
        ChannelAddress::new(TARGET_CHANNEL),
    );

    (engine, store, dir)
}

pub fn create_event(message_id: i64, chat_id: i64, text: Option<&str>) -> InboundMessage {
    InboundMessage {
        message_id,
        chat_id,
        date: chrono::Utc::now(),
        text: text.map(str::to_string),
        reply_to_message_id: None,
        metadata: Some(serde_json::json!({ "from": { "id": 42 } })),
    }
}

pub fn reply_event(
    message_id: i64,
    chat_id: i64,
    text: &str,
    reply_to_message_id: i64,
) -> InboundMessage {
    InboundMessage {
        reply_to_message_id: Some(reply_to_message_id),
        ..create_event(message_id, chat_id, Some(text))
    }
}
