//! Typed per-event results.
//!
//! Every variant is a normal end state for one inbound event, not an
//! `Err`: handlers log failures and keep the dispatcher alive, and the
//! outcome is what callers and tests can assert on.

/// Why an event was ignored without any store write or delivery call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Event did not originate from the configured source channel.
    NotSourceChannel,
    /// Event carried no usable text.
    NoText,
    /// A source message with this (chat id, message id) is already stored.
    Duplicate,
    /// Edit for a message that was never stored or never translated.
    NotTracked,
}

/// End state of handling one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Filtered out before any side effect.
    Skipped(SkipReason),
    /// New message translated and delivered; translation row written with
    /// status `success`.
    Delivered { target_message_id: i64 },
    /// New message translated but delivery failed on every address
    /// rendering; translation row written with status `failed`.
    DeliveryFailed,
    /// Edit translated and propagated; translation row mutated to
    /// status `updated`.
    Edited,
    /// Edit translated but the target-channel edit failed; translation row
    /// mutated to status `update_failed`, target channel untouched.
    EditFailed,
    /// No translation produced; nothing written (create) or mutated (edit).
    TranslationFailed,
    /// The store rejected a write the event cannot proceed without.
    StoreFailed,
}
