//! Client configuration from environment variables.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tactics_content::{ConfigLoader, EncounterData, EncounterLoader};
use tactics_core::CombatConfig;

const BUNDLED_CONFIG: &str = include_str!("../data/combat.toml");
const BUNDLED_ENCOUNTER: &str = include_str!("../data/skirmish.ron");

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// TOML combat rules; the bundled file when unset.
    pub config_path: Option<PathBuf>,
    /// RON encounter layout; the bundled skirmish when unset.
    pub encounter_path: Option<PathBuf>,
    /// Overrides the initiative seed from the rules file.
    pub seed: Option<u64>,
    /// The skirmish is called a draw after this many turns.
    pub max_turns: u32,
}

impl ClientConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 30;

    /// Environment variables:
    /// - `TACTICS_CONFIG` - combat rules file
    /// - `TACTICS_ENCOUNTER` - encounter layout file
    /// - `TACTICS_SEED` - initiative seed
    /// - `TACTICS_MAX_TURNS` - turn limit (default: 30)
    pub fn from_env() -> Self {
        Self {
            config_path: env::var_os("TACTICS_CONFIG").map(PathBuf::from),
            encounter_path: env::var_os("TACTICS_ENCOUNTER").map(PathBuf::from),
            seed: read_env("TACTICS_SEED"),
            max_turns: read_env::<u32>("TACTICS_MAX_TURNS")
                .unwrap_or(Self::DEFAULT_MAX_TURNS)
                .max(1),
        }
    }

    pub fn combat(&self) -> Result<CombatConfig> {
        let config = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::parse(BUNDLED_CONFIG)?,
        };
        Ok(match self.seed {
            Some(seed) => config.with_initiative_seed(seed),
            None => config,
        })
    }

    pub fn encounter(&self) -> Result<EncounterData> {
        match &self.encounter_path {
            Some(path) => EncounterLoader::load(path),
            None => EncounterLoader::parse(BUNDLED_ENCOUNTER),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
