//! Tactics skirmish binary.
//!
//! Composition root: loads combat rules and an encounter, assembles the
//! in-memory collaborators and the combat controller, then plays the
//! encounter with a scripted Blue pilot against the reference AI. Every
//! controller event is written to stdout as one JSON line; logs go to
//! stderr.
//!
//! ```bash
//! TACTICS_SEED=7 RUST_LOG=debug cargo run -p tactics-client
//! ```

mod config;
mod pilot;
mod skirmish;
mod table;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;
use crate::skirmish::Skirmish;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();
    let combat = config.combat()?;
    let encounter = config.encounter()?;

    tracing::info!("Starting skirmish");
    tracing::info!(
        "Grid {}x{}, party of {}, {} enemy stages",
        encounter.dimensions.width,
        encounter.dimensions.height,
        encounter.party.len(),
        encounter.stages.len()
    );

    // 2. Assemble and play
    let outcome = Skirmish::new(encounter, combat, config.max_turns)
        .run()
        .await?;

    tracing::info!("Skirmish finished: {}", outcome);
    Ok(())
}
