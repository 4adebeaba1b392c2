//! Persistence models: source messages, translations, relay stats.

mod relay_stats;
mod source_message;
mod translation;

pub use relay_stats::RelayStats;
pub use source_message::SourceMessageRecord;
pub use translation::{TranslationRecord, TranslationStatus};
