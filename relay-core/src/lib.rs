//! Core types and contracts for the signal relay.
//!
//! ## Modules
//!
//! - [`error`] – RelayError and Result alias
//! - [`types`] – InboundMessage projection and conversion trait
//! - [`channel`] – ChannelAddress normalization and address renderings
//! - [`delivery`] – Delivery trait (send/edit in the target channel)
//! - [`translator`] – Translator trait
//! - [`logger`] – tracing initialization

pub mod channel;
pub mod delivery;
pub mod error;
pub mod logger;
pub mod translator;
pub mod types;

pub use channel::{AddressRendering, ChannelAddress};
pub use delivery::Delivery;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use translator::Translator;
pub use types::{InboundMessage, ToInboundMessage};
