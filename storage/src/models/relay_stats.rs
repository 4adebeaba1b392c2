//! Aggregate counts over stored messages and translations.

use serde::{Deserialize, Serialize};

/// Relay-wide counters for operator visibility and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayStats {
    pub total_messages: i64,
    pub total_translations: i64,
    /// Translations with status success or updated.
    pub delivered: i64,
    /// Translations with status failed or update_failed.
    pub failed: i64,
}
