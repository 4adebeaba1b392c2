//! Telegram wiring for the signal relay.
//!
//! ## Modules
//!
//! - [`adapters`] – teloxide Message → core InboundMessage conversion
//! - [`delivery`] – TelegramDelivery with address-rendering fallback
//! - [`runner`] – dispatcher setup for polling and webhook modes

pub mod adapters;
pub mod delivery;
pub mod runner;

pub use adapters::TelegramMessageWrapper;
pub use delivery::TelegramDelivery;
pub use runner::{run_polling, run_webhook};
