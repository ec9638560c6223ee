//! Data-driven combat content and loaders.
//!
//! - Combat rules configuration (TOML)
//! - Encounter layouts: grid size, walls, units, triggers (RON)
//!
//! Content is turned into oracles and rosters by the host; it never appears
//! in controller state directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, EncounterData, EncounterLoader, InteractableSpec, TriggerSpec, UnitSpec,
};
