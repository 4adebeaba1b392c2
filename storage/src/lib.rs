//! Storage crate: durable source-message and translation persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – SourceMessageRecord, TranslationRecord, TranslationStatus, RelayStats
//! - [`message_store`] – MessageStore (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_store;
mod models;
mod sqlite_pool;


pub use error::StorageError;
pub use message_store::{MessageStore, SourceMessageWithTranslation};
pub use models::{RelayStats, SourceMessageRecord, TranslationRecord, TranslationStatus};
pub use sqlite_pool::SqlitePoolManager;
