//! signal-relay: mirrors a source Telegram channel into a target channel,
//! translating each post through an OpenRouter-hosted model and keeping
//! edits and reply threads in sync.

use anyhow::{Context, Result};
use clap::Parser;
use relay_cli::{load_config, run_relay, Cli, Commands};
use relay_core::init_tracing;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;

            if let Some(parent) = Path::new(&config.log_file).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Create log directory {}", parent.display()))?;
                }
            }
            init_tracing(&config.log_file)?;

            run_relay(config).await
        }
    }
}
