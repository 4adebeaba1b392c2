//! # relay-cli
//!
//! CLI foundation for the signal relay: argument parsing, env config
//! loading, and assembly of store, translator, delivery, and engine.

pub mod cli;
pub mod config;
pub mod run;

pub use cli::{load_config, Cli, Commands};
pub use config::{DeliveryMode, RelayConfig};
pub use run::run_relay;
