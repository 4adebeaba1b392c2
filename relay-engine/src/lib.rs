//! Relay engine: the message-correlation and idempotent-relay core.
//!
//! [`RelayEngine`] consumes inbound create/edit events from the source
//! channel, persists them, drives translation and delivery through the
//! [`relay_core::Translator`] and [`relay_core::Delivery`] collaborators,
//! and records every outcome (including partial failure) in the store.
//! Handlers return a typed [`RelayOutcome`] and never raise to the event
//! dispatcher: the inbound loop must keep accepting events.

mod engine;
mod outcome;

pub use engine::{RelayEngine, RelayTimeouts};
pub use outcome::{RelayOutcome, SkipReason};
